//! Test fixture creation
//!
//! Writes a small emotion-vector catalog CSV into a temporary directory.

use super::constants::*;
use anyhow::Result;
use moodreel_server::EmotionAxis;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn vector(values: &[(EmotionAxis, f64)]) -> String {
    let mut dense = [0.0; 12];
    for (axis, value) in values {
        dense[axis.index()] = *value;
    }
    let joined: Vec<String> = dense.iter().map(|v| format!("{:.1}", v)).collect();
    format!("\"[{}]\"", joined.join(", "))
}

/// Creates the fixture catalog, returning the directory guard and file path.
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    use EmotionAxis::*;

    let dir = TempDir::new()?;
    let path = dir.path().join("emotion_vectors.csv");
    let mut file = std::fs::File::create(&path)?;

    writeln!(file, "title,release_year,emotion_vector,vote_average")?;
    let named = [
        (SUNSHINE_TITLE, "2004", vector(&[(Happy, 9.0), (Hopeful, 6.0)]), "7.8"),
        ("Laugh Riot", "1998.0", vector(&[(Happy, 8.0), (Energetic, 5.0)]), "6.9"),
        (RAIN_TITLE, "2011", vector(&[(Sad, 9.0), (Thoughtful, 6.0)]), "7.2"),
        ("Heartbreak Hotel", "1995", vector(&[(Sad, 8.0), (Romantic, 4.0)]), ""),
        (STORM_TITLE, "2019", vector(&[(Angry, 8.0), (Excited, 7.0)]), "5.5"),
        (STILL_WATERS_TITLE, "2001", vector(&[(Peaceful, 9.0), (Thoughtful, 5.0)]), "8.1"),
    ];
    for (title, year, vector, rating) in named {
        writeln!(file, "{},{},{},{}", title, year, vector, rating)?;
    }

    // Malformed rows, skipped on load
    writeln!(file, "Broken Vector,2000,\"[1, 2, 3]\",6.0")?;
    writeln!(file, "Far Future,2999,{},6.0", vector(&[(Happy, 9.0)]))?;

    for i in 0..FILLER_COUNT {
        let happy = 6.0 + (i % 40) as f64 / 10.0;
        writeln!(
            file,
            "{} {},{},{},{:.1}",
            FILLER_PREFIX,
            i,
            1960 + i,
            vector(&[(Happy, happy), (Curious, 2.0)]),
            5.0 + (i % 5) as f64
        )?;
    }

    Ok((dir, path))
}
