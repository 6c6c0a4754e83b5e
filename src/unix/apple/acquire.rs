// Take a look at the license at the top of the repository in the LICENSE file.

use objc2_core_foundation::{CFData, CFString, kCFAllocatorDefault};
use objc2_io_kit::{
    IORegistryEntryCreateCFProperty, IOServiceGetMatchingService, IOServiceMatching,
    kIOMasterPortDefault,
};

use super::utils::IOReleaser;
use crate::{ChecksumPolicy, EntryPoint, Error, parse_entry_point_with};

// Properties of the `AppleSMBIOS` service holding the entry point and the table.
const ENTRY_POINT_PROPERTY: &str = "SMBIOS-EPS";
const TABLE_PROPERTY: &str = "SMBIOS";

pub(crate) fn acquire(policy: ChecksumPolicy) -> Result<(EntryPoint, Vec<u8>), Error> {
    let service = apple_smbios_service()?;

    let data = get_data_property(&service, ENTRY_POINT_PROPERTY)
        .ok_or_else(|| Error::acquisition("SMBIOS entry point is unreachable"))?;
    let mut buf = [0; EntryPoint::BUFFER_LEN];
    let len = data.len().min(buf.len());
    buf[..len].copy_from_slice(&data[..len]);
    let entry_point = parse_entry_point_with(&buf[..len], policy)?;

    let table = get_data_property(&service, TABLE_PROPERTY)
        .ok_or_else(|| Error::acquisition("SMBIOS property data is unreachable"))?;
    if table.is_empty() {
        return Err(Error::acquisition("no data in AppleSMBIOS IOService"));
    }
    Ok((entry_point, table))
}

fn apple_smbios_service() -> Result<IOReleaser, Error> {
    let matching = match unsafe { IOServiceMatching(c"AppleSMBIOS".as_ptr().cast()) } {
        Some(matching) => matching,
        None => {
            smbios_debug!("IOServiceMatching call failed, `AppleSMBIOS` not found");
            return Err(Error::acquisition("AppleSMBIOS service is unreachable"));
        }
    };

    let result = unsafe {
        IOServiceGetMatchingService(kIOMasterPortDefault, Some(matching.as_opaque().into()))
    };
    IOReleaser::new(result).ok_or_else(|| {
        smbios_debug!("IOServiceGetMatchingService failed");
        Error::acquisition("AppleSMBIOS service is unreachable")
    })
}

fn get_data_property(service: &IOReleaser, key: &str) -> Option<Vec<u8>> {
    let key_cfstring = CFString::from_str(key);
    let property = unsafe {
        IORegistryEntryCreateCFProperty(
            service.inner(),
            Some(&key_cfstring),
            kCFAllocatorDefault,
            0,
        )
    }?;

    match property.downcast::<CFData>() {
        Ok(data) => Some(data.to_vec()),
        Err(_) => {
            smbios_debug!("`{}` property of AppleSMBIOS isn't a CFData", key);
            None
        }
    }
}
