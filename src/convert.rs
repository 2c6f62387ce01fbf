//! One-shot WikiQA dataset conversion.
//!
//! Reads a tab-delimited file with at least `Label`, `Question` and
//! `Sentence` columns, keeps the rows labelled as correct answers, and
//! writes a comma-delimited `Question,Answer` file. Failures are fatal to
//! the run; there is no retry or partial-output guarantee.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Marker value in the `Label` column for a correct answer.
const CORRECT_LABEL: i64 = 1;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Columns we consume from the source file; anything else is ignored.
#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(rename = "Label")]
    label: i64,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Sentence")]
    sentence: String,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Answer")]
    answer: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ConvertSummary {
    pub rows_read: usize,
    pub rows_written: usize,
}

/// Filter the source rows to correct answers and write them out as
/// question/answer pairs.
pub fn convert(input: &Path, output: &Path) -> Result<ConvertSummary, ConvertError> {
    let input_err = |source| ConvertError::Input {
        path: input.display().to_string(),
        source,
    };
    let output_err = |source| ConvertError::Output {
        path: output.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(input)
        .map_err(input_err)?;

    let mut writer = csv::Writer::from_path(output).map_err(output_err)?;

    let mut rows_read = 0;
    let mut rows_written = 0;

    for record in reader.deserialize::<InputRow>() {
        let row = record.map_err(input_err)?;
        rows_read += 1;

        if row.label != CORRECT_LABEL {
            continue;
        }

        writer
            .serialize(OutputRow {
                question: row.question,
                answer: row.sentence,
            })
            .map_err(output_err)?;
        rows_written += 1;
    }

    writer.flush().map_err(|e| output_err(e.into()))?;

    info!(rows_read, rows_written, "dataset converted");

    Ok(ConvertSummary {
        rows_read,
        rows_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_input(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("WikiQA-test.tsv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn keeps_only_correct_rows_and_renames_columns() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "QuestionID\tQuestion\tSentence\tLabel\n\
             Q1\thow are glaciers formed?\tGlaciers form from compacted snow.\t1\n\
             Q2\twhat is a corporation?\tA corporation is a town in Kansas.\t0\n",
        );
        let output = dir.path().join("chatbot_dataset.csv");

        let summary = convert(&input, &output).unwrap();
        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_written, 1);

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Question,Answer\nhow are glaciers formed?,Glaciers form from compacted snow.\n"
        );
    }

    #[test]
    fn answers_with_commas_are_quoted_in_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "Question\tSentence\tLabel\nq\tone, two, three\t1\n",
        );
        let output = dir.path().join("out.csv");

        convert(&input, &output).unwrap();

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "q");
        assert_eq!(&record[1], "one, two, three");
    }

    #[test]
    fn missing_input_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert(
            &dir.path().join("nope.tsv"),
            &dir.path().join("out.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::Input { .. }));
        assert!(err.to_string().contains("nope.tsv"));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "Question\tSentence\nq\ta\n");
        let output = dir.path().join("out.csv");

        let err = convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::Input { .. }));
    }
}
