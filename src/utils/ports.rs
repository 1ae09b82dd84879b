/// Return a sorted list of available serial ports as (port_name, port_type_string).
pub fn enumerate_ports() -> Vec<(String, String)> {
    let mut ports = match serialport::available_ports() {
        Ok(ports) => ports,
        Err(err) => {
            log::warn!("Failed to enumerate serial ports: {err}");
            Vec::new()
        }
    };
    ports.sort_by(|a, b| a.port_name.cmp(&b.port_name));
    ports
        .into_iter()
        .map(|p| (p.port_name.clone(), describe_port_type(&p.port_type)))
        .collect()
}

/// Names only, in the same order as [`enumerate_ports`].
pub fn enumerate_port_names() -> Vec<String> {
    enumerate_ports().into_iter().map(|(name, _)| name).collect()
}

fn describe_port_type(port_type: &serialport::SerialPortType) -> String {
    match port_type {
        serialport::SerialPortType::UsbPort(info) => {
            let mut label = format!("USB {:04x}:{:04x}", info.vid, info.pid);
            if let Some(product) = &info.product {
                label.push(' ');
                label.push_str(product);
            }
            label
        }
        serialport::SerialPortType::PciPort => "PCI".to_string(),
        serialport::SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        serialport::SerialPortType::Unknown => "Unknown".to_string(),
    }
}
