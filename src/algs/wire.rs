//! Byte views of halo payloads.
//!
//! Columns travel as the native in-memory representation of `f64`; both
//! ranks of a run are assumed to share endianness (true for MPI jobs on one
//! homogeneous cluster and trivially for in-process ranks).

use bytemuck::Pod;

/// Message tags of the interface exchange.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum HaloTag {
    /// Data flowing towards higher ranks (left rank's edge → right rank's ghost).
    Eastward = 0,
    /// Data flowing towards lower ranks (right rank's edge → left rank's ghost).
    Westward = 1,
}

impl HaloTag {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

pub fn cast_slice<T: Pod>(v: &[T]) -> &[u8] {
    bytemuck::cast_slice(v)
}

pub fn cast_slice_mut<T: Pod>(v: &mut [T]) -> &mut [u8] {
    bytemuck::cast_slice_mut(v)
}
