//! Common structures: the primitive and composite types that appear
//! verbatim on the wire in RouterInfos, LeaseSets, and I2NP messages.
//!
//! [Common structures specification](https://geti2p.net/spec/common-structures)

mod certificate;
mod date;
mod hash;
mod integer;
mod key_certificate;
mod keys_and_cert;
mod lease;
mod lease_set;
mod mapping;
mod router_address;
mod router_info;
mod string;

pub use certificate::{Certificate, CertificateType};
pub use date::I2PDate;
pub use hash::Hash;
pub use integer::{read_u16_be, read_u32_be, read_u8, Integer};
pub use key_certificate::KeyCertificate;
pub use keys_and_cert::{Destination, KeysAndCert, RouterIdentity};
pub use lease::Lease;
pub use lease_set::LeaseSet;
pub use mapping::Mapping;
pub use router_address::RouterAddress;
pub use router_info::RouterInfo;
pub use string::I2PString;
