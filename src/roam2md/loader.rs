//! # Export Loader
//!
//! Turns a Roam JSON export into the typed [`Page`]/[`Block`] forest.
//!
//! Parsing happens in two steps. The document is first read as a list of
//! untyped JSON values, then every page and block is decoded on its own.
//! That way a bad node is reported with its position in the outline
//! (`pages[3] "Reading list" > children[0] > children[2]`) rather than with a
//! bare line/column.
//!
//! Any error here is fatal: the converter never works from a partial forest.

use crate::daily;
use crate::error::{ConvertError, Result};
use crate::model::{sanitize_title, Block, Page};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawPage {
    title: Option<String>,
    #[serde(default)]
    children: Vec<Value>,
    #[serde(rename = "create-time")]
    create_time: Option<i64>,
    #[serde(rename = "edit-time")]
    edit_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    uid: Option<String>,
    string: Option<String>,
    heading: Option<u8>,
    #[serde(default)]
    children: Vec<Value>,
    #[serde(rename = "create-time")]
    create_time: Option<i64>,
    #[serde(rename = "edit-time")]
    edit_time: Option<i64>,
}

/// Reads and parses an export file. Invalid UTF-8 sequences are replaced
/// rather than rejected.
pub fn load_file(path: &Path) -> Result<Vec<Page>> {
    let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    parse_export(&String::from_utf8_lossy(&bytes))
}

pub fn parse_export(json: &str) -> Result<Vec<Page>> {
    let values: Vec<Value> =
        serde_json::from_str(json).map_err(|e| ConvertError::parse("export", e.to_string()))?;

    let pages = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| parse_page(i, value))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("loaded {} pages", pages.len());
    Ok(pages)
}

fn parse_page(index: usize, value: Value) -> Result<Page> {
    let path = format!("pages[{}]", index);
    let raw: RawPage =
        serde_json::from_value(value).map_err(|e| ConvertError::parse(&path, e.to_string()))?;

    let source_title = raw
        .title
        .ok_or_else(|| ConvertError::parse(&path, "missing field `title`"))?;
    let path = format!("{} {:?}", path, source_title);

    let children = parse_blocks(&path, raw.children)?;

    let sanitized = sanitize_title(&source_title);
    let (title, is_daily) = match daily::parse_daily_title(&sanitized) {
        Some(date) => (daily::iso_title(date), true),
        None => (sanitized, false),
    };

    Ok(Page {
        title,
        source_title,
        daily: is_daily,
        children,
        create_time: raw.create_time,
        edit_time: raw.edit_time,
    })
}

fn parse_blocks(parent: &str, values: Vec<Value>) -> Result<Vec<Block>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| parse_block(&format!("{} > children[{}]", parent, i), value))
        .collect()
}

fn parse_block(path: &str, value: Value) -> Result<Block> {
    let raw: RawBlock =
        serde_json::from_value(value).map_err(|e| ConvertError::parse(path, e.to_string()))?;

    let text = raw
        .string
        .ok_or_else(|| ConvertError::parse(path, "missing field `string`"))?;

    Ok(Block {
        uid: raw.uid,
        text,
        heading: raw.heading,
        children: parse_blocks(path, raw.children)?,
        create_time: raw.create_time,
        edit_time: raw.edit_time,
    })
}
