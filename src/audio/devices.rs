use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

use crate::audio::error::GraphError;

/// An input device as presented in the device selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioDevice {
    pub id: String,
    pub name: String,
}

/// Every input device the host exposes, in enumeration order. The first
/// entry is the default selection when none has been chosen.
pub fn list_input_devices(host: &Host) -> Vec<AudioDevice> {
    let mut devices = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for (i, device) in inputs.enumerate() {
            let name = device
                .name()
                .unwrap_or_else(|_| format!("Microphone {}", i + 1));
            devices.push(AudioDevice {
                id: name.clone(),
                name,
            });
        }
    }

    devices
}

/// Looks up an input device by id, falling back to the host default when
/// no id is given.
pub fn find_input_device(host: &Host, device_id: Option<&str>) -> Result<Device, GraphError> {
    match device_id {
        Some(id) => {
            if let Ok(inputs) = host.input_devices() {
                for device in inputs {
                    if device.name().map(|name| name == id).unwrap_or(false) {
                        return Ok(device);
                    }
                }
            }
            Err(GraphError::DeviceNotFound(id.to_owned()))
        }
        None => host
            .default_input_device()
            .ok_or(GraphError::NoDefaultDevice),
    }
}
