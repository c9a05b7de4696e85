//! Single-file implementation of the Typst `World` trait
//!
//! The world holds exactly one source file, the report template, and exposes
//! the request data to it through `sys.inputs`. Nothing is read from disk.

use std::collections::HashMap;

use chrono::{Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime, Dict, Str, Value};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::{global_font_cache, FontCache};

const MAIN_PATH: &str = "/main.typ";

pub struct VirtualWorld {
    main: Source,
    font_cache: &'static FontCache,
    library: LazyHash<Library>,
    time: chrono::DateTime<Utc>,
}

impl VirtualWorld {
    /// Create a world around `source` with `inputs` bound to `sys.inputs`
    pub fn new(source: String, inputs: HashMap<String, serde_json::Value>) -> Self {
        let id = FileId::new(None, VirtualPath::new(MAIN_PATH));
        let inputs: Dict = inputs
            .into_iter()
            .map(|(key, value)| (Str::from(key), json_to_value(&value)))
            .collect();

        Self {
            main: Source::new(id, source),
            font_cache: global_font_cache(),
            library: LazyHash::new(Library::builder().with_inputs(inputs).build()),
            time: Utc::now(),
        }
    }
}

/// Convert a JSON value to a Typst value.
///
/// Integers outside the `i64` range become floats.
fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or_default()),
        },
        serde_json::Value::String(s) => Value::Str(s.as_str().into()),
        serde_json::Value::Array(items) => {
            Value::Array(items.iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(fields) => Value::Dict(
            fields
                .iter()
                .map(|(name, field)| (Str::from(name.as_str()), json_to_value(field)))
                .collect(),
        ),
    }
}

impl World for VirtualWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        self.font_cache.book()
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let adjusted = self.time + chrono::Duration::hours(offset.unwrap_or(0));

        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}
