use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use healthgate_analysis::encounter::EncounterDocument;

/// Write `value` as pretty-printed JSON to `output_path`, or stdout if `None`
///
/// # Errors
///
/// Returns error if the file cannot be created or written
pub fn write_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let (mut writer, target): (Box<dyn Write>, String) = match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write newline to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {target}"))?;

    tracing::info!(output = %target, "wrote JSON output");
    Ok(())
}

/// Read an encounter document from a JSON file
///
/// The document is validated before it is returned, so every player's health
/// series is known to be sorted by time.
///
/// # Errors
///
/// Returns error if the file cannot be opened, parsed, or fails validation
pub fn read_encounter_file<P>(path: P) -> anyhow::Result<EncounterDocument>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open encounter file: {}", path.display()))?;
    let document: EncounterDocument = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse encounter JSON file: {}", path.display()))?;
    document
        .validate()
        .with_context(|| format!("Invalid encounter file: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        fight = %document.fight_name,
        players = document.players.len(),
        phases = document.phases.len(),
        "loaded encounter"
    );
    Ok(document)
}
