// SPDX-License-Identifier: MPL-2.0
use pedalcast::app::{self, paths, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap_or(None),
        api_base_url: args.opt_value_from_str("--api-base-url").unwrap_or(None),
        data_dir: args.opt_value_from_str("--data-dir").unwrap_or(None),
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or(None),
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    app::run(flags)
}
