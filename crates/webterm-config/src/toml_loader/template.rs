//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# webterm configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[overlay]
# timeout_ms = 2000          # 0-60000, 0 keeps the size toast up
# class_name = "xterm-overlay"

[terminal]
# focus_on_open = true
# web_links = true

# Applied right after the terminal opens. Same keys the host sends.
[terminal.initial_preferences]
# font-size = 13
# font-family = "Menlo"
# cursor-style = "block"     # block, underline, bar
# cursor-blink = true
# scrollback-lines = 10000
# foreground-color = "#cccac2"
# background-color = "#1f2430"
# color-palette-overrides = [
#   "#171b24", "#f28779", "#bae67e", "#ffd580",
#   "#73d0ff", "#d4bfff", "#95e6cb", "#cccac2",
#   "#707a8c", "#f28779", "#bae67e", "#ffd580",
#   "#73d0ff", "#d4bfff", "#95e6cb", "#f3f4f5",
# ]

[preferences]
# color_merge = "replace"    # replace, cumulative

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
}
