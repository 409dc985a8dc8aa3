//! Sampler descriptors and the shared sampler library

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// How a texture is filtered and addressed when sampled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SamplerDescriptor {
    pub min_filter: wgpu::FilterMode,
    pub mag_filter: wgpu::FilterMode,
    pub mip_filter: wgpu::FilterMode,
    pub address_mode_u: wgpu::AddressMode,
    pub address_mode_v: wgpu::AddressMode,
}

impl Default for SamplerDescriptor {
    fn default() -> Self {
        Self {
            min_filter: wgpu::FilterMode::Nearest,
            mag_filter: wgpu::FilterMode::Nearest,
            mip_filter: wgpu::FilterMode::Nearest,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
        }
    }
}

impl SamplerDescriptor {
    /// Equivalent wgpu descriptor
    pub fn to_wgpu(&self) -> wgpu::SamplerDescriptor<'static> {
        wgpu::SamplerDescriptor {
            label: Some("Sampler"),
            address_mode_u: self.address_mode_u,
            address_mode_v: self.address_mode_v,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: self.mag_filter,
            min_filter: self.min_filter,
            mipmap_filter: self.mip_filter,
            ..Default::default()
        }
    }
}

/// A sampler configuration handed out by the [`SamplerLibrary`]
#[derive(Debug, PartialEq, Eq)]
pub struct Sampler {
    descriptor: SamplerDescriptor,
}

impl Sampler {
    pub fn descriptor(&self) -> &SamplerDescriptor {
        &self.descriptor
    }

    /// Create the GPU sampler object
    pub fn create(&self, device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&self.descriptor.to_wgpu())
    }
}

/// Deduplicating store of samplers, one per distinct descriptor
#[derive(Debug, Default)]
pub struct SamplerLibrary {
    samplers: Mutex<HashMap<SamplerDescriptor, Arc<Sampler>>>,
}

impl SamplerLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the sampler for `descriptor`, creating it on first use
    pub fn get_sampler(&self, descriptor: SamplerDescriptor) -> Arc<Sampler> {
        let mut samplers = self
            .samplers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(
            samplers
                .entry(descriptor)
                .or_insert_with(|| Arc::new(Sampler { descriptor })),
        )
    }

    pub fn len(&self) -> usize {
        self.samplers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
