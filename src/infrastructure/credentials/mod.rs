pub mod mock;
pub mod remote;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::AuthServiceName;
use crate::domain::models::CredentialServiceBox;
use crate::domain::models::StoreArc;

pub struct CredentialManager {}

impl CredentialManager {
    pub fn get(name: AuthServiceName, store: StoreArc) -> Result<CredentialServiceBox> {
        if name == AuthServiceName::Mock {
            return Ok(Box::new(mock::MockCredentials::new(store)));
        }

        if name == AuthServiceName::Remote {
            return Ok(Box::<remote::RemoteCredentials>::default());
        }

        bail!(format!("No credential service implemented for {name}"))
    }
}
