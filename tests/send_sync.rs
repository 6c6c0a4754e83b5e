// Take a look at the license at the top of the repository in the LICENSE file.

#[test]
fn test_send_sync() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}

    is_send::<smbios_stream::EntryPoint>();
    is_sync::<smbios_stream::EntryPoint>();
    is_send::<smbios_stream::Smbios>();
    is_sync::<smbios_stream::Smbios>();
    is_send::<smbios_stream::Error>();
    is_sync::<smbios_stream::Error>();
    is_send::<smbios_stream::TableStream<'static>>();
    is_sync::<smbios_stream::TableStream<'static>>();
}
