pub const HELP: &str = "\
h - help
q - quit
r - run to next breakpoint
s - do a single instruction step";
