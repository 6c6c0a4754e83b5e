// Take a look at the license at the top of the repository in the LICENSE file.

use crate::{
    Bits32, Bits64, ChecksumPolicy, EntryPoint, Header, Structure, Table, Version,
    WindowsEntryPoint,
};
use serde::{Serialize, Serializer, ser::SerializeStruct};

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Version", 3)?;

        state.serialize_field("major", &self.major)?;
        state.serialize_field("minor", &self.minor)?;
        state.serialize_field("revision", &self.revision)?;

        state.end()
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Table", 2)?;

        state.serialize_field("address", &self.address)?;
        state.serialize_field("length", &self.length)?;

        state.end()
    }
}

impl Serialize for ChecksumPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (index, variant) = match *self {
            ChecksumPolicy::Strict => (0, "Strict"),
            ChecksumPolicy::Warn => (1, "Warn"),
        };
        serializer.serialize_unit_variant("ChecksumPolicy", index, variant)
    }
}

impl Serialize for Bits32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Bits32", 12)?;

        state.serialize_field("checksum", &self.checksum)?;
        state.serialize_field("length", &self.length)?;
        state.serialize_field("major", &self.major)?;
        state.serialize_field("minor", &self.minor)?;
        state.serialize_field("max_structure_size", &self.max_structure_size)?;
        state.serialize_field("entry_point_revision", &self.entry_point_revision)?;
        state.serialize_field("formatted_area", &self.formatted_area)?;
        state.serialize_field("intermediate_checksum", &self.intermediate_checksum)?;
        state.serialize_field("structure_table_length", &self.structure_table_length)?;
        state.serialize_field("structure_table_address", &self.structure_table_address)?;
        state.serialize_field("number_of_structures", &self.number_of_structures)?;
        state.serialize_field("bcd_revision", &self.bcd_revision)?;

        state.end()
    }
}

impl Serialize for Bits64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Bits64", 9)?;

        state.serialize_field("checksum", &self.checksum)?;
        state.serialize_field("length", &self.length)?;
        state.serialize_field("major", &self.major)?;
        state.serialize_field("minor", &self.minor)?;
        state.serialize_field("docrev", &self.docrev)?;
        state.serialize_field("entry_point_revision", &self.entry_point_revision)?;
        state.serialize_field("reserved", &self.reserved)?;
        state.serialize_field("structure_table_max_size", &self.structure_table_max_size)?;
        state.serialize_field("structure_table_address", &self.structure_table_address)?;

        state.end()
    }
}

impl Serialize for WindowsEntryPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("WindowsEntryPoint", 5)?;

        state.serialize_field("used_20_calling_method", &self.used_20_calling_method)?;
        state.serialize_field("major", &self.major)?;
        state.serialize_field("minor", &self.minor)?;
        state.serialize_field("dmi_revision", &self.dmi_revision)?;
        state.serialize_field("length", &self.length)?;

        state.end()
    }
}

impl Serialize for EntryPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            EntryPoint::Bits32(ref ep) => {
                serializer.serialize_newtype_variant("EntryPoint", 0, "Bits32", ep)
            }
            EntryPoint::Bits64(ref ep) => {
                serializer.serialize_newtype_variant("EntryPoint", 1, "Bits64", ep)
            }
            EntryPoint::Windows(ref ep) => {
                serializer.serialize_newtype_variant("EntryPoint", 2, "Windows", ep)
            }
        }
    }
}

impl Serialize for Header {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Header", 3)?;

        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("length", &self.length)?;
        state.serialize_field("handle", &self.handle)?;

        state.end()
    }
}

impl Serialize for Structure {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Structure", 3)?;

        state.serialize_field("header", &self.header)?;
        state.serialize_field("formatted", &self.formatted)?;
        // Strings aren't guaranteed to be valid UTF-8.
        let strings: Vec<_> = self
            .strings
            .iter()
            .map(|s| String::from_utf8_lossy(s))
            .collect();
        state.serialize_field("strings", &strings)?;

        state.end()
    }
}
