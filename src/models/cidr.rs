//! IPv4 CIDR block parsing and helpers.
//!
//! Provides [`CidrBlock`] for representing an address range in
//! `a.b.c.d/len` notation, as returned by the network provider.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use aws_webapp_stack::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, String> {
    if len > MAX_LENGTH {
        Err("Network length is too long".to_string())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, String> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// IPv4 address range in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl CidrBlock {
    /// The block admitting every IPv4 source.
    pub const UNRESTRICTED: CidrBlock = CidrBlock {
        addr: Ipv4Addr::UNSPECIFIED,
        mask: 0,
    };

    /// Create a new [`CidrBlock`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<CidrBlock, String> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| format!("Invalid address/mask: '{addr_cidr}'"))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| format!("Invalid address {addr}"))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| format!("Invalid prefix length {mask}"))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".to_string());
        }
        Ok(CidrBlock { addr, mask })
    }

    /// True when the block covers the entire IPv4 space.
    ///
    /// Any `/0` counts, whatever host bits were written.
    pub fn is_unrestricted(&self) -> bool {
        self.mask == 0
    }

    /// Lowest (network) address of the block.
    pub fn network(&self) -> Ipv4Addr {
        // mask is validated on construction, so this can't fail
        cut_addr(self.addr, self.mask).unwrap_or(self.addr)
    }
}

impl FromStr for CidrBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CidrBlock::new(s)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CidrBlock::new(&s).map_err(de::Error::custom)
    }
}
