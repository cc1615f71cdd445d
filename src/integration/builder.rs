//! Builder for creating TargetDescriptor objects from engine outputs.

use crate::recognition::TargetDescriptor;

/// Builder for creating `TargetDescriptor` objects, used by engine bindings
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    uid: String,
    name: String,
    aspect_ratio: f32,
    data: Vec<u8>,
}

impl DescriptorBuilder {
    /// Create a new descriptor builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unique identifier.
    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    /// Set the human-readable name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the reference-image aspect ratio (width / height).
    pub fn aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the aspect ratio from reference-image dimensions.
    pub fn dimensions(mut self, width: f32, height: f32) -> Self {
        self.aspect_ratio = width / height;
        self
    }

    /// Set the engine-owned binary payload.
    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Build the final `TargetDescriptor`.
    pub fn build(self) -> TargetDescriptor {
        TargetDescriptor::new(self.uid, self.name, self.aspect_ratio, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let descriptor = DescriptorBuilder::new()
            .uid("t-1")
            .name("poster")
            .dimensions(1920.0, 1080.0)
            .data(vec![7, 7, 7])
            .build();

        assert_eq!(descriptor.uid, "t-1");
        assert!((descriptor.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }
}
