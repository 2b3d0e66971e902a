//! Compiles the remote-transport RPC schema (§4.7) into Rust types via `tonic-build`.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/actor.proto"], &["proto"])?;
    println!("cargo:rerun-if-changed=proto/actor.proto");
    Ok(())
}
