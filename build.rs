// Take a look at the license at the top of the repository in the LICENSE file.

fn main() {
    if std::env::var("TARGET").unwrap_or_default().contains("-apple") {
        println!("cargo:rustc-link-lib=framework=IOKit");
        println!("cargo:rustc-link-lib=framework=CoreFoundation");
    }
}
