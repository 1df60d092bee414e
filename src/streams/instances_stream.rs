use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::VfdtError;
use crate::streams::Stream;
use std::sync::Arc;

/// Finite stream over instances already held in memory.
#[derive(Debug, Clone)]
pub struct InstancesStream {
    header: Arc<InstanceHeader>,
    instances: Vec<DenseInstance>,
    idx: usize,
}

impl InstancesStream {
    /// Every instance must share `header`.
    pub fn new(
        header: Arc<InstanceHeader>,
        instances: Vec<DenseInstance>,
    ) -> Result<Self, VfdtError> {
        if let Some(pos) = instances
            .iter()
            .position(|inst| !Arc::ptr_eq(&inst.header, &header) && *inst.header != *header)
        {
            return Err(VfdtError::SchemaMismatch(format!(
                "instance {pos} does not use relation '{}'",
                header.relation_name()
            )));
        }
        Ok(Self {
            header,
            instances,
            idx: 0,
        })
    }

    /// Builds the stream from rows of value indices.
    pub fn from_rows(
        header: Arc<InstanceHeader>,
        rows: &[Vec<usize>],
    ) -> Result<Self, VfdtError> {
        let instances = rows
            .iter()
            .map(|row| DenseInstance::from_indices(Arc::clone(&header), row))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(header, instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[DenseInstance] {
        &self.instances
    }
}

impl Stream for InstancesStream {
    fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.idx < self.instances.len()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        let inst = self.instances.get(self.idx)?.clone();
        self.idx += 1;
        Some(Box::new(inst))
    }

    fn restart(&mut self) -> Result<(), VfdtError> {
        self.idx = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::header_abc;

    #[test]
    fn yields_rows_in_order_then_stops() {
        let header = header_abc();
        let rows = [vec![0, 1, 0], vec![2, 0, 1]];
        let mut stream = InstancesStream::from_rows(Arc::clone(&header), &rows).unwrap();
        assert_eq!(stream.len(), 2);
        assert!(stream.has_more_instances());
        assert_eq!(stream.next_instance().unwrap().to_vec(), vec![0.0, 1.0, 0.0]);
        assert_eq!(stream.next_instance().unwrap().to_vec(), vec![2.0, 0.0, 1.0]);
        assert!(!stream.has_more_instances());
        assert!(stream.next_instance().is_none());

        stream.restart().unwrap();
        assert_eq!(stream.next_instance().unwrap().to_vec(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn rejects_instances_from_another_schema() {
        let other = InstanceHeader::nominal("other", &[("x", &["a"]), ("c", &["p"])], 1).unwrap();
        let inst = DenseInstance::from_indices(other, &[0, 0]).unwrap();
        assert!(matches!(
            InstancesStream::new(header_abc(), vec![inst]),
            Err(VfdtError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn equal_headers_are_accepted() {
        let a = header_abc();
        let b = header_abc();
        let inst = DenseInstance::from_indices(a, &[0, 0, 0]).unwrap();
        assert!(InstancesStream::new(b, vec![inst]).is_ok());
    }
}
