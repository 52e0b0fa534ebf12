/// Route `tracing` events to the browser console.
///
/// Safe to call more than once; only the first subscriber sticks. Native
/// builds leave subscriber setup to the embedding program.
pub fn init() {
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use tracing::subscriber::set_global_default;
        use tracing::Level;
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::Registry;

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );

        let _ = set_global_default(Registry::default().with(wasm_layer));
    }
}
