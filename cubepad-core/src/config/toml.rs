//! Simple TOML parser for mapping configuration
//!
//! This is a minimal parser that handles only the subset needed for a
//! cubepad mapping file. It does NOT support the full TOML spec. Every key
//! is optional; missing keys keep their default value.
//!
//! Supported features:
//! - Key = value pairs (string, integer, hex integer)
//! - [section] and [section.subsection] headers
//! - Comments (# ...)
//!
//! Recognised sections:
//! - `[axis.x]`, `[axis.y]`, `[axis.z]`, `[axis.rx]`: node, component, threshold, offset
//! - `[buttons]`: trigger
//! - `[tilt.0]`, `[tilt.1]`: node, down, up, right, left
//! - `[touch]`: node0, node1, node2
//! - `[neighbor]`: policy ("latched" or "pairs"), mask

use crate::mapping::{AxisMap, TiltButtons};
use crate::sensor::AxisComponent;

use super::types::{ConfigError, MappingConfig, NeighborPolicy};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Invalid value type or out of range
    InvalidValue,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Parsed mapping failed validation
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Axis(AxisSlot),
    Buttons,
    Tilt(usize),
    Touch,
    Neighbor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisSlot {
    X,
    Y,
    Z,
    Rx,
}

/// Parse a mapping file, starting from the default mapping
pub fn parse_mapping(input: &str) -> Result<MappingConfig, ParseError> {
    let mut config = MappingConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "axis.x", "tilt.0" or "touch"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some((group, name)) = header.split_once('.') {
        return match (group, name) {
            ("axis", "x") => Ok(Section::Axis(AxisSlot::X)),
            ("axis", "y") => Ok(Section::Axis(AxisSlot::Y)),
            ("axis", "z") => Ok(Section::Axis(AxisSlot::Z)),
            ("axis", "rx") => Ok(Section::Axis(AxisSlot::Rx)),
            ("tilt", "0") => Ok(Section::Tilt(0)),
            ("tilt", "1") => Ok(Section::Tilt(1)),
            _ => Err(ParseError::InvalidSection),
        };
    }

    match header {
        "buttons" => Ok(Section::Buttons),
        "touch" => Ok(Section::Touch),
        "neighbor" => Ok(Section::Neighbor),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Remove a trailing comment, ignoring '#' inside quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a decimal or `0x` hex integer
fn parse_int(value: &str) -> Result<i64, ParseError> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let (digits, radix) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (digits, 10),
    };

    // from_str_radix accepts a leading sign of its own
    if digits.starts_with(['+', '-']) {
        return Err(ParseError::InvalidValue);
    }

    let magnitude = i64::from_str_radix(digits, radix).map_err(|_| ParseError::InvalidValue)?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Integer narrowing with range check
fn parse_num<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    T::try_from(parse_int(value)?).map_err(|_| ParseError::InvalidValue)
}

fn parse_component(value: &str) -> Result<AxisComponent, ParseError> {
    match parse_string(value) {
        "x" | "X" => Ok(AxisComponent::X),
        "y" | "Y" => Ok(AxisComponent::Y),
        "z" | "Z" => Ok(AxisComponent::Z),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_policy(value: &str) -> Result<NeighborPolicy, ParseError> {
    match parse_string(value) {
        "latched" => Ok(NeighborPolicy::Latched),
        "pairs" => Ok(NeighborPolicy::Pairs),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a parsed value to the config
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MappingConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => Err(ParseError::UnknownKey),
        Section::Axis(slot) => {
            let axis = axis_mut(config, slot);
            apply_axis(axis, key, value)
        }
        Section::Buttons => match key {
            "trigger" => {
                config.buttons.trigger = parse_num(value)?;
                Ok(())
            }
            _ => Err(ParseError::UnknownKey),
        },
        Section::Tilt(index) => apply_tilt(&mut config.buttons.tilt[index], key, value),
        Section::Touch => {
            let slot = match key {
                "node0" => 0,
                "node1" => 1,
                "node2" => 2,
                _ => return Err(ParseError::UnknownKey),
            };
            config.buttons.touch[slot] = parse_num(value)?;
            Ok(())
        }
        Section::Neighbor => {
            match key {
                "policy" => config.neighbor_policy = parse_policy(value)?,
                "mask" => config.buttons.neighbor = parse_num(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
    }
}

fn axis_mut(config: &mut MappingConfig, slot: AxisSlot) -> &mut AxisMap {
    match slot {
        AxisSlot::X => &mut config.axes.x,
        AxisSlot::Y => &mut config.axes.y,
        AxisSlot::Z => &mut config.axes.z,
        AxisSlot::Rx => &mut config.axes.rx,
    }
}

fn apply_axis(axis: &mut AxisMap, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "node" => axis.source.node = parse_num(value)?,
        "component" => axis.source.component = parse_component(value)?,
        "threshold" => axis.transform.threshold = parse_num(value)?,
        "offset" => axis.transform.offset = parse_num(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_tilt(group: &mut TiltButtons, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "node" => group.node = parse_num(value)?,
        "down" => group.down = parse_num(value)?,
        "up" => group.up = parse_num(value)?,
        "right" => group.right = parse_num(value)?,
        "left" => group.left = parse_num(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
