//! Blank-line delimited `KEY: value` blocks, shared by the quest and item files.

use crate::errors::DataError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// 1-based line number in the source text.
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// One record: consecutive non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub start_line: usize,
    pub fields: Vec<Field>,
}

impl Block {
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn required(&self, key: &'static str) -> Result<&Field, DataError> {
        self.get(key).ok_or(DataError::MissingField {
            line: self.start_line,
            field: key,
        })
    }

    pub fn required_str(&self, key: &'static str) -> Result<String, DataError> {
        Ok(self.required(key)?.value.clone())
    }

    pub fn required_u32(&self, key: &'static str) -> Result<u32, DataError> {
        let field = self.required(key)?;
        field.value.parse::<u32>().map_err(|_| DataError::InvalidFormat {
            line: field.line,
            reason: format!("{} must be a non-negative integer, got '{}'", key, field.value),
        })
    }

    /// Rejects keys outside `allowed`.
    pub fn check_keys(&self, allowed: &[&str]) -> Result<(), DataError> {
        match self.fields.iter().find(|f| !allowed.contains(&f.key.as_str())) {
            Some(field) => Err(DataError::InvalidFormat {
                line: field.line,
                reason: format!("unknown key '{}'", field.key),
            }),
            None => Ok(()),
        }
    }
}

/// Splits text into blocks. Keys are upper-cased and values trimmed; the
/// value is everything after the first colon.
pub fn parse_blocks(text: &str) -> Result<Vec<Block>, DataError> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| DataError::InvalidFormat {
            line: line_no,
            reason: "expected 'KEY: value'".to_string(),
        })?;
        let key = key.trim().to_ascii_uppercase();

        let block = current.get_or_insert_with(|| Block {
            start_line: line_no,
            fields: Vec::new(),
        });
        if block.get(&key).is_some() {
            return Err(DataError::InvalidFormat {
                line: line_no,
                reason: format!("duplicate key '{}'", key),
            });
        }
        block.fields.push(Field {
            line: line_no,
            key,
            value: value.trim().to_string(),
        });
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    Ok(blocks)
}
