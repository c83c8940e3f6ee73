// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Actuator commands.

pub mod differential_pwm;
pub mod drone_control;
pub mod drone_mode;
pub mod drone_motor_command;

pub use differential_pwm::DifferentialPwm;
pub use drone_control::DroneControl;
pub use drone_mode::{DroneMode, Mode};
pub use drone_motor_command::DroneMotorCommand;
