//! Time-above-health-threshold analysis of encounter logs
//!
//! This crate turns a parsed encounter log into per-phase, per-player
//! statistics on how long each player stayed above a health threshold, and
//! rolls those up per subgroup and for the whole squad.
//!
//! # Overview
//!
//! ```text
//! EncounterDocument (encounter)
//!     ↓ extract (extract)
//! HealthReport
//!  └─ phases: Vec<PhaseReport>
//!      └─ health_data: Vec<PhaseResult>   (best first)
//!     ↓ total_average / subgroup_averages (aggregate)
//! Average, Vec<SubgroupAverage>
//!     ↓ PhaseBreakdown (breakdown)
//! total / subgroup / player rows
//! ```
//!
//! Every step is a pure function of its inputs. The document is only read,
//! so the same document can be analyzed at several thresholds concurrently.
//!
//! # Modules
//!
//! - [`encounter`]: input document model and validation
//! - [`extract`]: phase extraction and per-player integration
//! - [`aggregate`]: total and subgroup averages
//! - [`breakdown`]: combined rows for one phase
//! - [`threshold`]: validated threshold percentages
//! - [`phase_id`]: unique phase identifiers
//! - [`duration`]: duration formatting
//!
//! # Examples
//!
//! ```
//! use healthgate_analysis::{
//!     aggregate, breakdown::PhaseBreakdown, encounter::EncounterDocument, extract::extract,
//!     threshold::Threshold,
//! };
//!
//! let document: EncounterDocument = serde_json::from_str(r#"{
//!     "durationMS": 1000,
//!     "players": [
//!         { "account": "A.1", "name": "A", "profession": "Guardian", "group": 1,
//!           "healthPercents": [[0, 100], [400, 50]] },
//!         { "account": "B.2", "name": "B", "profession": "Mesmer", "group": 2,
//!           "healthPercents": [[0, 100], [600, 50]] }
//!     ],
//!     "phases": [{ "name": "Full Fight", "start": 0, "end": 1000 }]
//! }"#)?;
//!
//! let threshold: Threshold = "90".parse()?;
//! let report = extract(&document, threshold.as_f64());
//! let phase = report.select_phase(None)?;
//!
//! let total = aggregate::total_average(&phase.health_data);
//! assert!((total.percent_above_threshold - 50.0).abs() < 1e-9);
//!
//! let groups = aggregate::subgroup_averages(&phase.health_data, &report.players);
//! assert_eq!(groups[0].group, 2);
//!
//! let breakdown = PhaseBreakdown::new(phase, &report.players);
//! assert_eq!(breakdown.rows.len(), 1 + 2 + 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod breakdown;
pub mod duration;
pub mod encounter;
pub mod extract;
pub mod phase_id;
pub mod threshold;
