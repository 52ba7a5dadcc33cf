use std::path::Path;

#[cfg(feature = "profile-with-puffin")]
use std::sync::Mutex;

#[cfg(feature = "profile-with-puffin")]
lazy_static::lazy_static! {
    static ref puffin_server: Mutex<Option<puffin_http::Server>> = {
        println!("Initializing profiling server:");
        let server_addr =
                format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        println!(
                "Run this to view profiling data:  puffin_viewer {server_addr}"
            );
        Mutex::new(puffin_http::Server::new(&server_addr).ok())
    };
}

/// Create the output directory unless it is already there.
/// Existing contents are kept; snapshot files are overwritten by name.
pub fn ensure_dir_exists<P: AsRef<Path>>(path: &P) -> std::io::Result<()> {
    let p = path.as_ref();
    if p.exists() {
        if !p.is_dir() {
            return Err(std::io::Error::other(format!(
                "not a directory {p:?}"
            )));
        }
        println!("Exists: {p:?}");
    } else {
        println!("Creating: {p:?}");
        std::fs::create_dir_all(p)?;
    }
    Ok(())
}

/// Start the profiler if enabled and size the global rayon pool.
pub fn runtime_setup(threads: usize) -> std::io::Result<()> {
    #[cfg(feature = "profile-with-puffin")]
    {
        if let Ok(server_lock) = puffin_server.lock() {
            if let Some(server) = server_lock.as_ref() {
                std::thread::sleep(std::time::Duration::from_secs(2));
                profiling::puffin::set_scopes_on(true);
                profiling::finish_frame!();
                println!("t: {}", server.num_clients());
            }
        }
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("rayon_thread_{}", i))
        .build_global()
        .map_err(std::io::Error::other)
}

pub fn runtime_finish() {
    #[cfg(feature = "profile-with-puffin")]
    {
        println!("Flushing profiler");
        if let Ok(mut server) = puffin_server.lock() {
            server.take();
        }
    }
}
