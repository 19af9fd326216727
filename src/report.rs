use crate::error::TrackerError;
use crate::models::ReportGroup;
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};

pub fn print_summary(groups: &[ReportGroup]) {
    println!("\n===== RESULTS =====");
    for group in groups {
        println!("{}: {}", group.tier.title(), group.len());
    }
}

/// Console variant of the report: every member of each non-empty tier.
pub fn print_members(groups: &[ReportGroup]) {
    for group in groups.iter().filter(|g| !g.is_empty()) {
        println!("\n📋 {} ({})", group.tier.title(), group.len());
        for entry in &group.entries {
            println!("   - {} - {}", entry.name, entry.profile_url);
        }
    }
}

/// Write one section per non-empty group: title row, column header, members, blank line.
pub fn write_report<W: Write>(mut out: W, groups: &[ReportGroup]) -> Result<(), csv::Error> {
    for group in groups.iter().filter(|g| !g.is_empty()) {
        {
            let mut writer = WriterBuilder::new().flexible(true).from_writer(&mut out);
            writer.write_record([format!("# {} ({})", group.tier.title(), group.len())])?;
            writer.write_record(["Name", "Profile URL"])?;
            for entry in &group.entries {
                writer.write_record([&entry.name, &entry.profile_url])?;
            }
            writer.flush()?;
        }
        // csv writes an empty record as `""`, so the separator goes straight to the sink
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_report_file(path: &str, groups: &[ReportGroup]) -> Result<(), TrackerError> {
    let to_output_error = |source: csv::Error| TrackerError::Output {
        path: path.to_string(),
        source,
    };

    let file = File::create(path).map_err(|e| to_output_error(csv::Error::from(e)))?;
    write_report(BufWriter::new(file), groups).map_err(to_output_error)
}
