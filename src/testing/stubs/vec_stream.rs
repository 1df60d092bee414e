use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::VfdtError;
use crate::streams::Stream;
use crate::testing::dummies::header_binary;
use std::sync::Arc;

/// Finite stream of class labels over [`header_binary`].
pub struct VecStream {
    pub header: Arc<InstanceHeader>,
    pub labels: Vec<usize>,
    idx: usize,
}

impl VecStream {
    pub fn new(labels: Vec<usize>) -> Self {
        Self {
            header: header_binary(),
            labels,
            idx: 0,
        }
    }
}

impl Stream for VecStream {
    fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.idx < self.labels.len()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        let y = *self.labels.get(self.idx)?;
        self.idx += 1;
        Some(Box::new(DenseInstance::new(
            Arc::clone(&self.header),
            vec![y as f64],
        )))
    }

    fn restart(&mut self) -> Result<(), VfdtError> {
        self.idx = 0;
        Ok(())
    }
}
