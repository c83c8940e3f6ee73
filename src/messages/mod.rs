// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message catalogue.
//!
//! Types are grouped the way robots use them:
//! - [`standard`] - header and plain payloads
//! - [`geometry`] - vectors, rotations, homographies
//! - [`sensors`] - IMU, attitude, battery, camera frames
//! - [`actuators`] - drone and wheel commands
//! - [`simulation`] - simulator bundles

pub mod actuators;
pub mod geometry;
pub mod sensors;
pub mod simulation;
pub mod standard;

use std::sync::OnceLock;

use crate::core::{MessageRegistry, Result};

/// Register every shipped message type.
pub fn register_builtin(registry: &MessageRegistry) -> Result<()> {
    registry.register::<standard::Header>()?;
    registry.register::<standard::Text>()?;
    registry.register::<geometry::Vector3>()?;
    registry.register::<geometry::Quaternion>()?;
    registry.register::<geometry::Homography>()?;
    registry.register::<sensors::Attitude>()?;
    registry.register::<sensors::BatteryState>()?;
    registry.register::<sensors::Imu>()?;
    registry.register::<sensors::Image>()?;
    registry.register::<actuators::DifferentialPwm>()?;
    registry.register::<actuators::DroneControl>()?;
    registry.register::<actuators::DroneMode>()?;
    registry.register::<actuators::DroneMotorCommand>()?;
    registry.register::<simulation::WorldInput>()?;
    registry.register::<simulation::WorldOutput>()?;
    Ok(())
}

static BUILTIN: OnceLock<MessageRegistry> = OnceLock::new();

/// Registry holding the shipped catalogue.
pub fn builtin_registry() -> &'static MessageRegistry {
    BUILTIN.get_or_init(|| {
        let registry = MessageRegistry::new();
        if let Err(e) = register_builtin(&registry) {
            tracing::warn!(error = %e, "failed to register builtin message types");
        }
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue() {
        let registry = builtin_registry();
        assert_eq!(registry.len().unwrap(), 15);
        assert!(registry.contains("sensors/Imu").unwrap());
        assert!(registry.contains("simulation/WorldInput").unwrap());
        assert!(registry.contains("simulation/WorldOutput").unwrap());
    }

    #[test]
    fn test_every_type_exposes_every_field() {
        let registry = builtin_registry();
        for name in registry.names().unwrap() {
            let schema = registry.schema(name).unwrap().unwrap();
            assert_eq!(schema.name(), name);
            let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
            let mut unique = names.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), names.len(), "{name}");
        }
    }
}
