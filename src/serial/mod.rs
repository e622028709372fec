pub mod discovery;
pub mod tail;

/// Printed whenever opening a serial port fails. The usual culprit on a bench
/// machine is another program holding the port open.
pub const OPEN_REMEDIATION: &str = "\
Checklist:
  1. Close any IDE serial monitor (VS Code, Arduino, PlatformIO)
  2. Unplug the USB cable, wait 5 seconds, plug it back in
  3. Check that the CH340/CP210 driver is installed
  4. Run this tool again";
