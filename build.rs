use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata backs `--version` and the running version label used by the update check
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
