// Take a look at the license at the top of the repository in the LICENSE file.

// Prints the SMBIOS entry point and the structures of the table.
//
// Without arguments, the data of the current system is used. Otherwise, it expects the path of
// an entry point dump followed by the path of a table dump, like the files Linux exposes in
// `/sys/firmware/dmi/tables`.

use smbios_stream::{ChecksumPolicy, EntryPoint, Smbios, parse_entry_point_with};
use std::env;
use std::fs;
use std::process::ExitCode;

fn load() -> Result<Smbios, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [] => Smbios::acquire_with(ChecksumPolicy::Warn).map_err(|e| e.to_string()),
        [entry_point, table] => {
            let entry_point =
                fs::read(entry_point).map_err(|e| format!("failed to read `{entry_point}`: {e}"))?;
            let table = fs::read(table).map_err(|e| format!("failed to read `{table}`: {e}"))?;
            let entry_point = parse_entry_point_with(&entry_point, ChecksumPolicy::Warn)
                .map_err(|e| e.to_string())?;
            Ok(Smbios::new(entry_point, table))
        }
        _ => Err("usage: dump [ENTRY_POINT TABLE]".to_owned()),
    }
}

fn main() -> ExitCode {
    let smbios = match load() {
        Ok(smbios) => smbios,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let entry_point = smbios.entry_point();
    let kind = match entry_point {
        EntryPoint::Bits32(_) => "32-bit",
        EntryPoint::Bits64(_) => "64-bit",
        EntryPoint::Windows(_) => "Windows",
    };
    let table = entry_point.table_for(smbios.table().len());
    println!(
        "SMBIOS {} ({} entry point), table of {} bytes at {:#x}",
        entry_point.version(),
        kind,
        table.length,
        entry_point.physical_address(),
    );

    let structures = match smbios.structures() {
        Ok(structures) => structures,
        Err(e) => {
            eprintln!("failed to decode SMBIOS table: {e}");
            return ExitCode::FAILURE;
        }
    };
    for structure in &structures {
        println!(
            "handle {:#06x}, type {:>3}, {:>3} bytes",
            structure.header.handle,
            structure.header.kind,
            structure.size(),
        );
        for (i, s) in structure.strings.iter().enumerate() {
            println!("    {}: {}", i + 1, String::from_utf8_lossy(s));
        }
    }
    ExitCode::SUCCESS
}
