//! Flash-backed Parameter Storage
//!
//! Provides persistent parameter storage using Flash memory with CRC
//! validation and redundant block scanning for reliability.
//!
//! # Flash Block Format
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ Magic: [u8; 4] = b"PARM"                      │  Offset: 0
//! ├───────────────────────────────────────────────┤
//! │ Version: u32 = 1                              │  Offset: 4
//! ├───────────────────────────────────────────────┤
//! │ Parameter Count: u32                          │  Offset: 8
//! ├───────────────────────────────────────────────┤
//! │ Parameters: [(name, type, flags, value)]      │  Offset: 12
//! │   name: [u8; 16] (null-terminated)            │
//! │   type: u8 (0=Bool, 1=Int, 2=Float)           │
//! │   flags: u8                                   │
//! │   value: 1 or 4 bytes based on type           │
//! ├───────────────────────────────────────────────┤
//! │ CRC32: u32                                    │  Offset: block_size - 4
//! └───────────────────────────────────────────────┘
//! ```

use crate::platform::error::PlatformError;
use crate::platform::traits::FlashInterface;
use crate::platform::Result;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::{String, Vec};

/// Parameter block base address (Flash offset, past the firmware region)
const PARAM_BLOCK_BASE: u32 = 0x040000;

/// Parameter block size (4 KB per block)
const PARAM_BLOCK_SIZE: u32 = 4096;

/// Number of parameter blocks scanned on load (for redundancy)
const PARAM_BLOCK_COUNT: u32 = 4;

/// Magic number for parameter blocks
const PARAM_MAGIC: [u8; 4] = *b"PARM";

/// Parameter format version
const PARAM_VERSION: u32 = 1;

/// Maximum parameter name length (MAVLink PARAM_* limit)
const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is read-only (cannot be modified at runtime)
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Get type discriminant for serialization
    fn type_id(&self) -> u8 {
        match self {
            ParamValue::Bool(_) => 0,
            ParamValue::Int(_) => 1,
            ParamValue::Float(_) => 2,
        }
    }

    /// Serialize value to bytes
    fn serialize(&self, buf: &mut Vec<u8, 8>) -> Result<()> {
        match self {
            ParamValue::Bool(b) => {
                buf.push(if *b { 1 } else { 0 })
                    .map_err(|_| PlatformError::InvalidConfig)?;
            }
            ParamValue::Int(i) => {
                buf.extend_from_slice(&i.to_le_bytes())
                    .map_err(|_| PlatformError::InvalidConfig)?;
            }
            ParamValue::Float(f) => {
                buf.extend_from_slice(&f.to_le_bytes())
                    .map_err(|_| PlatformError::InvalidConfig)?;
            }
        }
        Ok(())
    }

    /// Deserialize value from bytes, advancing `offset`
    fn deserialize(type_id: u8, buf: &[u8], offset: &mut usize) -> Result<Self> {
        match type_id {
            0 => {
                if *offset >= buf.len() {
                    return Err(PlatformError::InvalidConfig);
                }
                let b = buf[*offset] != 0;
                *offset += 1;
                Ok(ParamValue::Bool(b))
            }
            1 => {
                if *offset + 4 > buf.len() {
                    return Err(PlatformError::InvalidConfig);
                }
                let i = i32::from_le_bytes([
                    buf[*offset],
                    buf[*offset + 1],
                    buf[*offset + 2],
                    buf[*offset + 3],
                ]);
                *offset += 4;
                Ok(ParamValue::Int(i))
            }
            2 => {
                if *offset + 4 > buf.len() {
                    return Err(PlatformError::InvalidConfig);
                }
                let f = f32::from_le_bytes([
                    buf[*offset],
                    buf[*offset + 1],
                    buf[*offset + 2],
                    buf[*offset + 3],
                ]);
                *offset += 4;
                Ok(ParamValue::Float(f))
            }
            _ => Err(PlatformError::InvalidConfig),
        }
    }
}

/// Parameter metadata
#[derive(Debug, Clone)]
struct ParamMetadata {
    flags: ParamFlags,
}

/// Parameter store with Flash persistence
pub struct ParameterStore {
    /// Parameter values
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    /// Parameter metadata
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
    /// Dirty flag (needs Flash write)
    dirty: bool,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
            dirty: false,
        }
    }

    /// Load parameters from Flash
    ///
    /// Scans the parameter blocks in order and uses the first valid one.
    /// Returns an empty store if no valid block is found.
    pub fn load_from_flash<F: FlashInterface>(flash: &mut F) -> Result<Self> {
        for block_id in 0..PARAM_BLOCK_COUNT {
            let address = PARAM_BLOCK_BASE + (block_id * PARAM_BLOCK_SIZE);

            if let Ok(store) = Self::load_from_block(flash, address) {
                return Ok(store);
            }
        }

        crate::log_warn!("No valid parameter blocks found, using defaults");
        Ok(Self::new())
    }

    /// Load parameters from a specific Flash block
    fn load_from_block<F: FlashInterface>(flash: &mut F, address: u32) -> Result<Self> {
        let mut buf = [0u8; PARAM_BLOCK_SIZE as usize];
        flash.read(address, &mut buf)?;

        if buf[0..4] != PARAM_MAGIC {
            return Err(PlatformError::InvalidConfig);
        }

        let version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        if version != PARAM_VERSION {
            return Err(PlatformError::InvalidConfig);
        }

        let stored_crc = u32::from_le_bytes([
            buf[PARAM_BLOCK_SIZE as usize - 4],
            buf[PARAM_BLOCK_SIZE as usize - 3],
            buf[PARAM_BLOCK_SIZE as usize - 2],
            buf[PARAM_BLOCK_SIZE as usize - 1],
        ]);
        let calculated_crc = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC)
            .checksum(&buf[0..PARAM_BLOCK_SIZE as usize - 4]);
        if stored_crc != calculated_crc {
            return Err(PlatformError::InvalidConfig);
        }

        let param_count = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]) as usize;
        if param_count > MAX_PARAMS {
            return Err(PlatformError::InvalidConfig);
        }

        let mut store = Self::new();
        let mut offset = 12;

        for _ in 0..param_count {
            if offset + PARAM_NAME_LEN + 2 > buf.len() {
                break;
            }

            let name_bytes = &buf[offset..offset + PARAM_NAME_LEN];
            let name_len = name_bytes
                .iter()
                .position(|&b| b == 0)
                .unwrap_or(PARAM_NAME_LEN);
            let name_str = core::str::from_utf8(&name_bytes[..name_len])
                .map_err(|_| PlatformError::InvalidConfig)?;
            let mut name = String::new();
            name.push_str(name_str).ok();
            offset += PARAM_NAME_LEN;

            let type_id = buf[offset];
            offset += 1;

            let flags = ParamFlags::from_bits_truncate(buf[offset]);
            offset += 1;

            match ParamValue::deserialize(type_id, &buf, &mut offset) {
                Ok(value) => {
                    store.parameters.insert(name.clone(), value).ok();
                    store.metadata.insert(name, ParamMetadata { flags }).ok();
                }
                Err(_) => break,
            }
        }

        Ok(store)
    }

    /// Save parameters to Flash
    ///
    /// Writes the primary parameter block (block 0). No-op when the store is
    /// clean.
    pub fn save_to_flash<F: FlashInterface>(&mut self, flash: &mut F) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let address = PARAM_BLOCK_BASE;
        let mut buf = [0xFFu8; PARAM_BLOCK_SIZE as usize];

        buf[0..4].copy_from_slice(&PARAM_MAGIC);
        buf[4..8].copy_from_slice(&PARAM_VERSION.to_le_bytes());

        let param_count = self.parameters.len() as u32;
        buf[8..12].copy_from_slice(&param_count.to_le_bytes());

        let mut offset = 12;
        let mut temp_buf = Vec::<u8, 8>::new();

        for (name, value) in &self.parameters {
            let name_bytes = name.as_bytes();
            let copy_len = core::cmp::min(name_bytes.len(), PARAM_NAME_LEN);
            buf[offset..offset + copy_len].copy_from_slice(&name_bytes[..copy_len]);
            // Null-terminate short names; the block starts erased to 0xFF
            for pad in &mut buf[offset + copy_len..offset + PARAM_NAME_LEN] {
                *pad = 0;
            }
            offset += PARAM_NAME_LEN;

            buf[offset] = value.type_id();
            offset += 1;

            let flags = self
                .metadata
                .get(name)
                .map(|m| m.flags)
                .unwrap_or(ParamFlags::empty());
            buf[offset] = flags.bits();
            offset += 1;

            temp_buf.clear();
            value.serialize(&mut temp_buf)?;
            buf[offset..offset + temp_buf.len()].copy_from_slice(&temp_buf);
            offset += temp_buf.len();
        }

        let crc = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC)
            .checksum(&buf[0..PARAM_BLOCK_SIZE as usize - 4]);
        buf[PARAM_BLOCK_SIZE as usize - 4..].copy_from_slice(&crc.to_le_bytes());

        flash.erase(address, PARAM_BLOCK_SIZE)?;
        flash.write(address, &buf)?;

        self.dirty = false;
        Ok(())
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let mut key = String::<PARAM_NAME_LEN>::new();
        key.push_str(name).ok()?;
        self.parameters.get(&key)
    }

    /// Set parameter value
    ///
    /// Marks the store as dirty. The parameter must already be registered and
    /// not read-only.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let mut key = String::<PARAM_NAME_LEN>::new();
        key.push_str(name).map_err(|_| PlatformError::InvalidConfig)?;

        if !self.parameters.contains_key(&key) {
            return Err(PlatformError::InvalidConfig);
        }

        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(PlatformError::InvalidConfig);
            }
        }

        self.parameters.insert(key, value).ok();
        self.dirty = true;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// Existing values (e.g. loaded from Flash) are not overwritten.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<()> {
        let mut key = String::<PARAM_NAME_LEN>::new();
        key.push_str(name).map_err(|_| PlatformError::InvalidConfig)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| PlatformError::InvalidConfig)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| PlatformError::InvalidConfig)?;
        self.dirty = true;
        Ok(())
    }

    /// Get parameter count
    pub fn count(&self) -> usize {
        self.parameters.len()
    }

    /// Check if store has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockFlash;

    #[test]
    fn test_param_value_serialization() {
        let mut buf = Vec::<u8, 8>::new();

        let b = ParamValue::Bool(true);
        b.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 1);

        buf.clear();
        let i = ParamValue::Int(42);
        i.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 4);

        buf.clear();
        let f = ParamValue::Float(3.25);
        f.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_parameter_store_basic() {
        let mut store = ParameterStore::new();

        store
            .register("CAM_DURATION", ParamValue::Int(10), ParamFlags::empty())
            .unwrap();

        assert_eq!(store.get("CAM_DURATION"), Some(&ParamValue::Int(10)));

        store.set("CAM_DURATION", ParamValue::Int(5)).unwrap();
        assert_eq!(store.get("CAM_DURATION"), Some(&ParamValue::Int(5)));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_parameter_read_only() {
        let mut store = ParameterStore::new();

        store
            .register("CAM_TYPE", ParamValue::Int(0), ParamFlags::READ_ONLY)
            .unwrap();

        assert!(store.set("CAM_TYPE", ParamValue::Int(1)).is_err());
    }

    #[test]
    fn test_set_unknown_parameter_rejected() {
        let mut store = ParameterStore::new();
        assert!(store.set("NOPE", ParamValue::Int(1)).is_err());
    }

    #[test]
    fn test_flash_round_trip() {
        let mut flash = MockFlash::new();

        let mut store = ParameterStore::new();
        store
            .register(
                "CAM_TRIGG_DIST",
                ParamValue::Float(25.0),
                ParamFlags::empty(),
            )
            .unwrap();
        store
            .register("CAM_AUTO_ONLY", ParamValue::Bool(true), ParamFlags::empty())
            .unwrap();
        store
            .register("CAM_DURATION", ParamValue::Int(10), ParamFlags::empty())
            .unwrap();
        store.save_to_flash(&mut flash).unwrap();
        assert!(!store.is_dirty());

        let loaded = ParameterStore::load_from_flash(&mut flash).unwrap();
        assert_eq!(loaded.count(), 3);
        assert_eq!(
            loaded.get("CAM_TRIGG_DIST"),
            Some(&ParamValue::Float(25.0))
        );
        assert_eq!(loaded.get("CAM_AUTO_ONLY"), Some(&ParamValue::Bool(true)));
        assert_eq!(loaded.get("CAM_DURATION"), Some(&ParamValue::Int(10)));
    }

    #[test]
    fn test_corrupted_block_falls_back_to_defaults() {
        let mut flash = MockFlash::new();

        let mut store = ParameterStore::new();
        store
            .register("CAM_DURATION", ParamValue::Int(10), ParamFlags::empty())
            .unwrap();
        store.save_to_flash(&mut flash).unwrap();

        // Corrupt the CRC region of block 0
        flash.inject_corruption(0x040000 + 4092, 4);

        let loaded = ParameterStore::load_from_flash(&mut flash).unwrap();
        assert_eq!(loaded.count(), 0);
    }
}
