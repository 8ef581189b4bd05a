//! Display blocks and the per-widget render functions

use serde_json::Value;

use super::instance::FieldValues;
use super::lifecycle::GENERIC_ERROR;

/// One piece of rendered widget output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Text(String),
    /// Monospace value meant to be copied
    Code(String),
    /// Pretty-printed JSON
    Json(String),
    Link { label: String, url: String },
    /// Picture served from `url`
    Image { alt: String, url: String },
    /// Color sample, as a CSS color value
    Swatch(String),
}

impl Block {
    /// Plain-text rendering for non-interactive output
    pub fn plain(&self) -> String {
        match self {
            Block::Heading(s) | Block::Text(s) | Block::Code(s) | Block::Json(s) => s.clone(),
            Block::Link { label, url } => format!("{}: {}", label, url),
            Block::Image { alt, url } => format!("[{}] {}", alt, url),
            Block::Swatch(color) => format!("Color: {}", color),
        }
    }
}

/// Text of a scalar JSON value; empty for null or missing
fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Whole body as pretty JSON
pub fn json(body: &Value, _: &FieldValues) -> Vec<Block> {
    vec![Block::Json(pretty(body))]
}

pub fn short_link(body: &Value, _: &FieldValues) -> Vec<Block> {
    match body.get("short").and_then(Value::as_str) {
        Some(short) if !short.is_empty() => vec![Block::Link {
            label: "Short URL".to_string(),
            url: short.to_string(),
        }],
        _ => vec![Block::Text(GENERIC_ERROR.to_string())],
    }
}

pub fn conversion(body: &Value, _: &FieldValues) -> Vec<Block> {
    vec![Block::Text(format!(
        "{} {} ≈ {} {}",
        scalar(&body["amount"]),
        scalar(&body["from"]),
        scalar(&body["result"]),
        scalar(&body["to"])
    ))]
}

pub fn weather(body: &Value, _: &FieldValues) -> Vec<Block> {
    let location = &body["location"];
    vec![
        Block::Heading(format!("{}, {}", scalar(&location["name"]), scalar(&location["country"]))),
        Block::Json(pretty(body)),
    ]
}

pub fn joke(body: &Value, _: &FieldValues) -> Vec<Block> {
    let text = scalar(&body["text"]);
    vec![Block::Text(if text.is_empty() { "—".to_string() } else { text })]
}

pub fn quote(body: &Value, _: &FieldValues) -> Vec<Block> {
    vec![Block::Text(format!(
        "“{}” — {}",
        scalar(&body["content"]),
        scalar(&body["author"])
    ))]
}

/// Image whose URL is the `message` field
pub fn dog(body: &Value, _: &FieldValues) -> Vec<Block> {
    match body.get("message").and_then(Value::as_str) {
        Some(url) if !url.is_empty() => vec![Block::Image {
            alt: "Dog".to_string(),
            url: url.to_string(),
        }],
        _ => Vec::new(),
    }
}

pub fn uuid(body: &Value, _: &FieldValues) -> Vec<Block> {
    vec![Block::Code(scalar(&body["uuid"]))]
}

pub fn lorem(body: &Value, _: &FieldValues) -> Vec<Block> {
    vec![Block::Text(scalar(&body["text"]))]
}

/// Astronomy picture of the day: title, picture for image media, explanation
pub fn apod(body: &Value, _: &FieldValues) -> Vec<Block> {
    let title = scalar(&body["title"]);
    let mut blocks = vec![Block::Heading(title.clone())];
    if body["media_type"] == "image" {
        blocks.push(Block::Image {
            alt: title,
            url: scalar(&body["url"]),
        });
    }
    blocks.push(Block::Text(scalar(&body["explanation"])));
    blocks
}

pub fn pokemon(body: &Value, _: &FieldValues) -> Vec<Block> {
    let name = scalar(&body["name"]);
    let mut blocks = vec![Block::Heading(format!("{} (#{})", name, scalar(&body["id"])))];
    if let Some(sprite) = body["sprites"]["front_default"].as_str() {
        blocks.push(Block::Image {
            alt: name,
            url: sprite.to_string(),
        });
    }
    let types = body["types"]
        .as_array()
        .map(|types| types.iter().map(scalar).collect::<Vec<_>>().join(", "))
        .unwrap_or_default();
    blocks.push(Block::Text(format!("Types: {}", types)));
    blocks
}

/// Swatch of the resolved color (falls back to the requested hex), then JSON
pub fn color(body: &Value, fields: &FieldValues) -> Vec<Block> {
    let swatch = body["hex"]["value"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| fields.get("hex").to_string());
    vec![Block::Swatch(swatch), Block::Json(pretty(body))]
}
