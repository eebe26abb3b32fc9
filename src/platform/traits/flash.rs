//! Flash interface trait
//!
//! This module defines the Flash memory interface used for parameter
//! persistence. Addresses are offsets into the region the platform reserves
//! for configuration storage.

use crate::platform::Result;

/// Flash interface trait
///
/// Platform implementations must provide this interface for persistent
/// parameter storage.
///
/// # Invariants
///
/// - `erase` must be called on a block before it is rewritten
/// - Erased bytes read back as 0xFF
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the
    /// range is out of bounds, `FlashError::ReadFailed` on a device error.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`
    ///
    /// The target range must have been erased first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the
    /// range is out of bounds, `FlashError::WriteFailed` on a device error.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `len` bytes starting at `address`
    ///
    /// Both `address` and `len` must be aligned to the device block size.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the
    /// range is out of bounds or misaligned, `FlashError::EraseFailed` on a
    /// device error.
    fn erase(&mut self, address: u32, len: u32) -> Result<()>;
}
