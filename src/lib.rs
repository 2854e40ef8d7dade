pub mod shared {
    pub mod core {
        pub mod clock;
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod object_storage;
    }
}

pub mod modules {
    pub mod watermarks {
        pub mod core {
            pub mod log;
            pub mod window;
        }
        pub mod use_cases {
            pub mod errors;
            pub mod resolve_extraction_window {
                pub mod handler;
                pub mod resolve;
            }
            pub mod update_watermark_log {
                pub mod handler;
                pub mod update;
            }
            pub mod run_incremental_extraction {
                pub mod handler;
                pub mod pipeline_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod log_codec;
                pub mod watermark_repository;
                pub mod watermark_repository_object_storage;
            }
        }
    }
}

pub mod shell;
