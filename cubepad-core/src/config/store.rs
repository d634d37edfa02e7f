//! Binary configuration storage
//!
//! The mapping is persisted as a versioned postcard blob. Loading checks
//! the version and validates the mapping before handing it out.

use serde::{Deserialize, Serialize};

use super::types::{ConfigError, MappingConfig, CONFIG_VERSION};

/// Upper bound of an encoded [`StoredConfig`]
pub const MAX_STORED_CONFIG_SIZE: usize = 128;

/// On-flash configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredConfig {
    pub version: u8,
    pub mapping: MappingConfig,
}

impl StoredConfig {
    pub fn new(mapping: MappingConfig) -> Self {
        Self {
            version: CONFIG_VERSION,
            mapping,
        }
    }
}

/// Serialize a mapping into `buffer`
///
/// Returns the number of bytes written.
pub fn save_mapping(mapping: &MappingConfig, buffer: &mut [u8]) -> Result<usize, ConfigError> {
    let record = StoredConfig::new(*mapping);
    let used = postcard::to_slice(&record, buffer).map_err(|_| ConfigError::Serialize)?;
    Ok(used.len())
}

/// Deserialize and validate a stored mapping
pub fn load_mapping(bytes: &[u8]) -> Result<MappingConfig, ConfigError> {
    let record: StoredConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

    if record.version != CONFIG_VERSION {
        warn!(
            "config version mismatch: found {}, expected {}",
            record.version,
            CONFIG_VERSION
        );
        return Err(ConfigError::VersionMismatch);
    }

    record.mapping.validate()?;
    debug!("loaded mapping config ({} bytes)", bytes.len());
    Ok(record.mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NeighborPolicy;

    #[test]
    fn test_saved_mapping_loads_back() {
        let mut mapping = MappingConfig::default();
        mapping.neighbor_policy = NeighborPolicy::Pairs;
        mapping.buttons.neighbor = 0x0100;
        mapping.axes.x.transform.offset = 25;

        let mut buffer = [0u8; MAX_STORED_CONFIG_SIZE];
        let len = save_mapping(&mapping, &mut buffer).unwrap();
        assert!(len > 0);

        assert_eq!(load_mapping(&buffer[..len]), Ok(mapping));
    }

    #[test]
    fn test_version_mismatch() {
        let record = StoredConfig {
            version: CONFIG_VERSION + 1,
            mapping: MappingConfig::default(),
        };
        let mut buffer = [0u8; MAX_STORED_CONFIG_SIZE];
        let used = postcard::to_slice(&record, &mut buffer).unwrap();
        let len = used.len();

        assert_eq!(load_mapping(&buffer[..len]), Err(ConfigError::VersionMismatch));
    }

    #[test]
    fn test_invalid_mapping_rejected() {
        let mut mapping = MappingConfig::default();
        mapping.axes.z.source.node = 5;

        let mut buffer = [0u8; MAX_STORED_CONFIG_SIZE];
        let len = save_mapping(&mapping, &mut buffer).unwrap();

        assert_eq!(load_mapping(&buffer[..len]), Err(ConfigError::NodeOutOfRange(5)));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buffer = [0u8; 4];
        assert_eq!(
            save_mapping(&MappingConfig::default(), &mut buffer),
            Err(ConfigError::Serialize)
        );
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(load_mapping(&[]), Err(ConfigError::Deserialize));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let mut mapping = MappingConfig::default();
        mapping.axes.y.transform.offset = -5;

        let mut buffer = [0u8; MAX_STORED_CONFIG_SIZE];
        let len = save_mapping(&mapping, &mut buffer).unwrap();

        assert_eq!(load_mapping(&buffer[..len]), Err(ConfigError::InvalidOffset));
    }
}
