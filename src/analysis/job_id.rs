use uuid::Uuid;

use crate::common::traits::JobIdGenerator;

/// Random v4 UUIDs rendered as 32 lowercase hex characters
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidJobIdGenerator;

impl JobIdGenerator for UuidJobIdGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
