use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Denote Menu",
        usage: "denote_menu <command> [options]",
        topics: ALL_TOPICS,
        footer: &[
            "Use `denote_menu help <topic>` for focused docs, e.g. `denote_menu help list`.",
        ],
    }
}

const FILTER_FLAGS: &[HelpFlag<'static>] = &[
    HelpFlag {
        name: "-r, --regex <pattern>",
        desc: "Keep notes whose file name matches the regex.",
    },
    HelpFlag {
        name: "-k, --keyword <kw[,kw]>",
        desc: "Keep notes carrying any of the keywords.",
    },
    HelpFlag {
        name: "-x, --exclude <kw[,kw]>",
        desc: "Drop notes carrying any of the keywords.",
    },
    HelpFlag {
        name: "--asc / --desc",
        desc: "Sort by identifier (default from config, descending).",
    },
];

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "list",
        summary: "Show notes as a Date / Title / Keywords table.",
        usage: "denote_menu list [-r regex] [-k kw] [-x kw] [--asc|--desc] [--type] [--plain]",
        details: &[
            "Starts from every note in the directory filtered by the default pattern.",
            "Each filter flag then narrows the rows shown so far, in the order given, so `-r a -r b` keeps names matching both.",
            "Files whose names carry a broken identifier are reported on stderr and left out.",
        ],
        flags: FILTER_FLAGS,
        section: Section::Command,
        examples: &[
            "denote_menu list -r meeting",
            "denote_menu list -k work,urgent -x draft",
        ],
    },
    HelpTopic {
        name: "export",
        summary: "Hand the filtered files to the configured file manager.",
        usage: "denote_menu export [-r regex] [-k kw] [-x kw]",
        details: &[
            "Runs `file_manager_command` with the file paths appended, or prints one path per line when none is configured.",
        ],
        flags: FILTER_FLAGS,
        section: Section::Command,
        examples: &["denote_menu export -k work | xargs ls -l"],
    },
    HelpTopic {
        name: "open",
        summary: "Open the note with the given identifier.",
        usage: "denote_menu open <identifier>",
        details: &[
            "Uses `open_command` from the config, else $VISUAL, $EDITOR, then vi.",
        ],
        flags: &[],
        section: Section::Command,
        examples: &["denote_menu open 20230101T090000"],
    },
    HelpTopic {
        name: "keywords",
        summary: "List keywords found in the directory with counts.",
        usage: "denote_menu keywords",
        details: &[],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "menu",
        summary: "Interactive session with cumulative filters.",
        usage: "denote_menu menu",
        details: &[
            "Reads commands line by line: list, filter <regex>, keyword [kw...], exclude <kw...>, clear, open [n], export, keywords, help, quit.",
            "Filters narrow the rows currently shown; `clear` goes back to the whole directory.",
            "A rejected command (bad regex, unknown row) leaves the rows as they were.",
        ],
        flags: &[],
        section: Section::Command,
        examples: &["printf 'filter work\\nexport\\n' | denote_menu menu"],
    },
    HelpTopic {
        name: "path",
        summary: "Print the notes directory.",
        usage: "denote_menu path",
        details: &[],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "help",
        summary: "Show this overview or a topic.",
        usage: "denote_menu help [topic]",
        details: &[],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "DENOTE_DIRECTORY",
        summary: "Notes directory (overrides `directory` in the config).",
        usage: "DENOTE_DIRECTORY",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "DENOTE_MENU_CONFIG",
        summary: "Config file path (default: <config dir>/denote-menu/config.toml).",
        usage: "DENOTE_MENU_CONFIG",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "DENOTE_MENU_LOG",
        summary: "Log filter for stderr diagnostics, e.g. `debug` (default warn).",
        usage: "DENOTE_MENU_LOG",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "DENOTE_MENU_NO_FZF",
        summary: "Disable fzf pickers in the menu.",
        usage: "DENOTE_MENU_NO_FZF",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable colored output.",
        usage: "NO_COLOR",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
];
