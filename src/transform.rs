use std::io::Write;

use tracing::warn;

use crate::catalog::Catalog;
use crate::domain::AdminLevel;
use crate::error::GeodataError;
use crate::geoid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    rows: Vec<Vec<String>>,
}

impl OutputTable {
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn code_header(&self) -> &[String] {
        &self.rows[0]
    }

    pub fn readable_header(&self) -> &[String] {
        &self.rows[1]
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[2..]
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), GeodataError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|err| GeodataError::Csv(err.to_string()))?;
        }
        writer
            .flush()
            .map_err(|err| GeodataError::Csv(err.to_string()))?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, GeodataError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(buffer)
    }
}

// Number of trailing columns rotated to the front of every row, identifier
// column included.
pub const TRAILING_COLUMNS: usize = 4;

fn move_trailing_to_front(mut row: Vec<String>) -> Vec<String> {
    let split = row.len() - TRAILING_COLUMNS;
    row.rotate_left(split);
    row
}

pub fn transform(
    raw_rows: Vec<Vec<String>>,
    level: AdminLevel,
    catalog: &Catalog,
) -> Result<OutputTable, GeodataError> {
    let rule = geoid::identifier_rule(level)?;
    if rule.geography_width() + 1 != TRAILING_COLUMNS {
        warn!(
            %level,
            geography_columns = rule.geography_width(),
            moved = TRAILING_COLUMNS,
            "leading columns do not match the geography columns of this level"
        );
    }

    let mut rows = raw_rows.into_iter();
    let mut code_header = rows
        .next()
        .ok_or_else(|| GeodataError::MalformedRow("response has no header row".to_string()))?;
    let width = code_header.len();
    let required = rule.geography_width().max(TRAILING_COLUMNS - 1);
    if width < required {
        return Err(GeodataError::MalformedRow(format!(
            "header has {width} columns, {level} needs at least {required}"
        )));
    }

    code_header.push(rule.column_name.to_string());
    let readable_header = code_header
        .iter()
        .map(|code| catalog.header_for(code).unwrap_or(code.as_str()).to_string())
        .collect::<Vec<_>>();

    let mut output = Vec::with_capacity(rows.len() + 2);
    output.push(move_trailing_to_front(code_header));
    output.push(move_trailing_to_front(readable_header));

    for (index, mut row) in rows.enumerate() {
        if row.len() != width {
            return Err(GeodataError::MalformedRow(format!(
                "data row {} has {} columns, header has {width}",
                index + 1,
                row.len()
            )));
        }
        let identifier = geoid::encode_with_rule(&rule, row.as_slice())?;
        row.push(identifier);
        output.push(move_trailing_to_front(row));
    }

    Ok(OutputTable { rows: output })
}
