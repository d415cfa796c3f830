const MAX_LINE_CHARS: usize = 4096;

/// Strip terminal escape sequences and control characters from one line of
/// subprocess output before it reaches the log. CMake and MSBuild both emit
/// colored output when they think they own a console.
pub fn sanitize_log_line(input: &str) -> String {
    let mut out = String::with_capacity(input.len().min(MAX_LINE_CHARS));
    let mut chars = input.chars().peekable();
    let mut count = 0usize;
    let mut truncated = false;

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                // CSI: consume until a final byte in '@'..='~'.
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('@'..='~').contains(&c) {
                            break;
                        }
                    }
                }
                // OSC: consume until BEL or ESC (the ST terminator follows).
                Some(']') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if c == '\x07' || c == '\x1b' {
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }
        if c == '\r' || c == '\n' {
            continue;
        }
        if c == '\t' {
            out.push(' ');
        } else if c.is_control() {
            continue;
        } else {
            out.push(c);
        }
        count += 1;
        if count >= MAX_LINE_CHARS {
            truncated = true;
            break;
        }
    }

    if truncated {
        out.push_str(" ...[truncated]");
    }
    out
}
