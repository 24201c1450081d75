#[derive(Debug, Clone)]
pub struct Settings {
    /// Name of the thread that runs `main`, as it appears in uncaught exception reports
    pub main_thread_name: String,

    /// Maximum number of objects the heap will hold
    ///
    /// Allocation past this point fails, and the exception engine turns that failure into an
    /// `OutOfMemoryError`.
    pub heap_limit: usize,

    /// Objects past `heap_limit` set aside for raising `OutOfMemoryError`
    pub heap_reserve: usize,

    /// Maximum number of frames on a single thread's call stack
    pub max_frames: usize,

    /// Exit status of the process after an uncaught exception is reported
    pub uncaught_exit_code: i32,
}

impl Settings {
    pub fn new() -> Settings {
        Settings {
            main_thread_name: String::from("main"),
            heap_limit: 1 << 20,
            heap_reserve: 16,
            max_frames: 1024,
            uncaught_exit_code: 1,
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings::new()
    }
}
