pub mod mock;
pub mod remote;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> Result<BackendBox> {
        if name == BackendName::Mock {
            return Ok(Box::<mock::MockBackend>::default());
        }

        if name == BackendName::Remote {
            return Ok(Box::<remote::RemoteBackend>::default());
        }

        bail!(format!("No backend implemented for {name}"))
    }
}
