//! IPv4 CIDR ブロック

use crate::error::StackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// IPv4 アドレスブロック（例: `10.0.0.0/24`）
///
/// ネットワークアドレスに正規化された状態でのみ構築される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cidr {
    network: Ipv4Addr,
    prefix: u8,
}

impl Cidr {
    pub fn new(address: Ipv4Addr, prefix: u8) -> Result<Self, StackError> {
        if prefix > 32 {
            return Err(StackError::InvalidCidr(format!("{}/{}", address, prefix)));
        }
        let network = Ipv4Addr::from(u32::from(address) & Self::mask_for(prefix));
        if network != address {
            // ホストビットが立っている表記は受け付けない
            return Err(StackError::InvalidCidr(format!(
                "{}/{} (network address is {})",
                address, prefix, network
            )));
        }
        Ok(Self { network, prefix })
    }

    /// 正規化済みと分かっている定数ブロック用
    pub(crate) const fn new_unchecked(network: Ipv4Addr, prefix: u8) -> Self {
        Self { network, prefix }
    }

    fn mask_for(prefix: u8) -> u32 {
        if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix))
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) | !Self::mask_for(self.prefix))
    }

    pub fn contains(&self, address: Ipv4Addr) -> bool {
        u32::from(address) & Self::mask_for(self.prefix) == u32::from(self.network)
    }

    /// 別のブロックを完全に含むか
    pub fn contains_block(&self, other: &Cidr) -> bool {
        other.prefix >= self.prefix && self.contains(other.network)
    }

    /// ネットワークアドレスから `offset` 番目のホストアドレス
    ///
    /// ネットワークアドレス・ブロードキャストアドレス・範囲外は `None`。
    pub fn host(&self, offset: u32) -> Option<Ipv4Addr> {
        let base = u32::from(self.network);
        let address = base.checked_add(offset)?;
        let broadcast = u32::from(self.broadcast());
        if offset == 0 || address >= broadcast {
            return None;
        }
        Some(Ipv4Addr::from(address))
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl FromStr for Cidr {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| StackError::InvalidCidr(s.to_string()))?;
        let address: Ipv4Addr = addr
            .parse()
            .map_err(|_| StackError::InvalidCidr(s.to_string()))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|_| StackError::InvalidCidr(s.to_string()))?;
        Cidr::new(address, prefix)
    }
}

impl TryFrom<String> for Cidr {
    type Error = StackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cidr> for String {
    fn from(cidr: Cidr) -> Self {
        cidr.to_string()
    }
}
