//! Paints one frame of sampled data to the terminal.

use std::{
    fmt,
    io::{self, Write},
};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

use crate::collection::Data;

const SECTION_RULE: &str = "--------";

/// The fixed frame layout. Being `Display`, it formats straight into any
/// sink, terminal or test buffer alike.
pub struct Frame<'a>(pub &'a Data);

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;
        let uptime = data.uptime;

        writeln!(f, "{SECTION_RULE}")?;
        writeln!(f, "CPU Utilization Metrics")?;
        writeln!(f, "CPU Usage: {:5.1}%", data.cpu_usage)?;
        writeln!(
            f,
            "Load Average (1min, 5min, 15min): {:.2}, {:.2}, {:.2}",
            data.load_avg[0], data.load_avg[1], data.load_avg[2]
        )?;
        writeln!(f, "{SECTION_RULE}")?;
        writeln!(f, "I/O Metrics")?;
        writeln!(f, "Disk I/O Rate: {:.2} KB/s", data.io_rate_kb)?;
        writeln!(f, "Disk I/O Activity (IOPS): {:.2}", data.io_activity)?;
        writeln!(f, "{SECTION_RULE}")?;
        writeln!(f, "Memory Metrics")?;
        writeln!(f, "Memory Usage: {:.2}%", data.mem_usage)?;
        writeln!(f, "Swap Activity: {:.2} pages per second", data.swap_activity)?;
        writeln!(f, "{SECTION_RULE}")?;
        writeln!(f, "System Uptime Metrics")?;
        writeln!(
            f,
            "OS Uptime: {} days, {}:{:02}:{:02}",
            uptime.days, uptime.hours, uptime.minutes, uptime.seconds
        )?;
        writeln!(f, "{SECTION_RULE}")
    }
}

/// Clears the terminal, homes the cursor, paints `data` as one frame, and
/// flushes so the frame is visible before the driver loop goes to sleep.
pub fn draw_data<W: Write>(out: &mut W, data: &Data) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(out, "{}", Frame(data))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use crate::collection::{uptime::Uptime, Data};

    use super::*;

    fn sample_data() -> Data {
        Data {
            cpu_usage: 75.0,
            load_avg: [0.25, 1.5, 2.75],
            io_rate_kb: 300.0,
            io_activity: 3082.0,
            mem_usage: 75.0,
            swap_activity: 15.0,
            uptime: Uptime::from_secs(2 * 86400 + 3 * 3600 + 4 * 60 + 5),
            ..Data::default()
        }
    }

    #[test]
    fn frame_carries_every_section_header() {
        let frame = Frame(&sample_data()).to_string();

        for header in [
            "CPU Utilization Metrics",
            "I/O Metrics",
            "Memory Metrics",
            "System Uptime Metrics",
        ] {
            assert!(frame.contains(header), "missing header: {header}");
        }
    }

    #[test]
    fn frame_formats_values_with_fixed_precision() {
        let frame = Frame(&sample_data()).to_string();

        assert!(frame.contains("CPU Usage:  75.0%"));
        assert!(frame.contains("Load Average (1min, 5min, 15min): 0.25, 1.50, 2.75"));
        assert!(frame.contains("Disk I/O Rate: 300.00 KB/s"));
        assert!(frame.contains("Disk I/O Activity (IOPS): 3082.00"));
        assert!(frame.contains("Memory Usage: 75.00%"));
        assert!(frame.contains("Swap Activity: 15.00 pages per second"));
        assert!(frame.contains("OS Uptime: 2 days, 3:04:05"));
    }

    #[test]
    fn draw_emits_clear_escape_then_frame() {
        let mut out = Vec::new();
        draw_data(&mut out, &sample_data()).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        // Frame content must come after the clear/home control sequences.
        let body_at = rendered.find("CPU Utilization Metrics").unwrap();
        assert!(rendered[..body_at].contains("\x1b["));
        assert!(rendered.ends_with(&format!("{SECTION_RULE}\n")));
    }
}
