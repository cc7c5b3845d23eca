//! What we tell the model to do.

/// Appended to a user request so the model answers with directives.
pub const TOOL_GUIDANCE: &str = r#"

AVAILABLE TOOLS:
You can use the following tools by including them in your response:

1. RUN_COMMAND: Execute a shell command in the repository root
   Format: RUN_COMMAND: <command>
   Example: RUN_COMMAND: git status

2. READ_FILE: Read the contents of a file
   Format: READ_FILE: <filepath>
   Example: READ_FILE: README.md

3. LIST_DIR: List contents of a directory
   Format: LIST_DIR: <directory>
   Example: LIST_DIR: src/

4. TEST_COMMAND: Check whether a command works
   Format: TEST_COMMAND: <command>
   Example: TEST_COMMAND: python3 --version

5. SEARCH_FILES: Search for text in files
   Format: SEARCH_FILES: <pattern> <directory>
   Example: SEARCH_FILES: "func main" .

6. GENERATE_DIFF: Generate a unified diff for suggested changes
   Format: GENERATE_DIFF: <description of changes>
   Example: GENERATE_DIFF: Add error handling to main function

7. APPLY_DIFF: Apply a unified diff to the repository
   Format: APPLY_DIFF: <unified diff with \n between lines>
   Example: APPLY_DIFF: --- a/file.txt\n+++ b/file.txt\n@@ -1,3 +1,4 @@\n line1\n+new line\n line2\n line3
   Or put the diff on the following lines and close it with END_DIFF:
   APPLY_DIFF:
   --- a/file.txt
   +++ b/file.txt
   @@ -1,1 +1,1 @@
   -old
   +new
   END_DIFF

8. CREATE_FILE: Create a new file with specified content
   Format: CREATE_FILE: <filepath>
   <content>
   END_FILE

   Example: CREATE_FILE: docs/README.md
   # Documentation

   This is a new documentation file.
   END_FILE

Rules:
- Each tool call must be on its own line with the exact format shown above.
- Paths are relative to the repository root.
- Examine files with READ_FILE, LIST_DIR or SEARCH_FILES before changing them.
- Hunk line numbers in diffs must match the current file; list hunks top to bottom.

User request: "#;

/// Compose the request sent for `ask`.
pub fn with_tool_guidance(prompt: &str) -> String {
    format!("{prompt}{TOOL_GUIDANCE}{prompt}")
}

/// Compose the request used by `GENERATE_DIFF`.
pub fn diff_request(description: &str) -> String {
    format!(
        "Based on this description: '{description}', generate a unified diff that implements the requested changes. \
         Only output the unified diff format, no explanations. The diff should be in the format:\n\
         --- a/filename\n\
         +++ b/filename\n\
         @@ -line,count +line,count @@\n \
         unchanged line\n\
         -removed line\n\
         +added line\n\n\
         Description: {description}"
    )
}
