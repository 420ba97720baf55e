pub const TITLE: &str = "LLM Report Generator";
pub const HISTORY_HEADING: &str = "Conversation History";
pub const EMPTY_HISTORY: &str = "No history yet.";
pub const REPORT_HEADING: &str = "Assembled Report";
pub const INPUT_PLACEHOLDER: &str = "Enter your request for Manager #1...";
pub const CLEAR_LABEL: &str = "Clean Up";
pub const FAILURE_NOTICE: &str = "Failed to generate report";

pub const HELP_TEXT: &str = "\
Type text to add it to the request. Commands:
  :submit       send the request to the orchestrator
  :clear        reset the request, history and assembled report
  :save         write the assembled report to the output directory
  :set <text>   replace the request text
  :help         show this help
  :quit         exit (waits for a pending report)
Start a line with '::' to add text beginning with ':'.
";
