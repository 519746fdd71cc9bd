#[cfg(not(target_os = "android"))]
fn main() {
    torchlight::start()
}

#[cfg(target_os = "android")]
fn main() {}
