//! Generated client/server bindings for `proto/actor.proto`, wired in by
//! `build.rs` the same way `airssys-wasm/build.rs` stages generated bindings
//! into the crate: codegen runs at build time, the output is `include!`d
//! rather than checked in.

tonic::include_proto!("fluxrt.remote.v1");
