use crate::cli::get_log_level_from_verbose;

pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(get_log_level_from_verbose(verbose))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
