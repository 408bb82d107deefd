use std::io::{self, BufRead, Write};

/// Console prompt helpers over any `BufRead`/`Write` pair, so tests can run
/// the whole session against scripted input.
///
/// Numeric prompts re-prompt until the input parses and lands in the
/// inclusive `[min, max]` range. End of input surfaces as an
/// `UnexpectedEof` error, which ends the session.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "console input closed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads a free-text line (addresses, review text). Leading and trailing
    /// whitespace is trimmed; the line may contain spaces.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.prompt_line(prompt)?.trim().to_string())
    }

    /// Reads a single word (usernames, product names). Re-prompts on blank
    /// input; anything after the first whitespace is discarded.
    pub fn read_token(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let line = self.prompt_line(prompt)?;
            if let Some(token) = line.split_whitespace().next() {
                return Ok(token.to_string());
            }
        }
    }

    pub fn read_u32(&mut self, prompt: &str, min: u32, max: u32) -> io::Result<u32> {
        self.read_u32_with(prompt, min, max, "Invalid input. Please try again.")
    }

    /// Menu selection; same bounds behavior as [`Self::read_u32`] but with the
    /// menu wording on bad input.
    pub fn menu_choice(&mut self, prompt: &str, min: u32, max: u32) -> io::Result<u32> {
        self.read_u32_with(prompt, min, max, "Invalid choice. Please try again.")
    }

    fn read_u32_with(
        &mut self,
        prompt: &str,
        min: u32,
        max: u32,
        complaint: &str,
    ) -> io::Result<u32> {
        loop {
            let line = self.prompt_line(prompt)?;
            match line.trim().parse::<u32>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => self.say(complaint)?,
            }
        }
    }

    pub fn read_f64(&mut self, prompt: &str, min: f64, max: f64) -> io::Result<f64> {
        loop {
            let line = self.prompt_line(prompt)?;
            match line.trim().parse::<f64>() {
                Ok(value) if value >= min && value <= max => return Ok(value),
                _ => self.say("Invalid input. Please try again.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn read_u32_reprompts_until_in_range() {
        let mut c = console("abc\n0\n99\n3\n");
        assert_eq!(c.read_u32("> ", 1, 6).unwrap(), 3);
    }

    #[test]
    fn read_f64_honors_inclusive_bounds() {
        let mut c = console("-1\n100.01\n100\n");
        assert_eq!(c.read_f64("> ", 0.0, 100.0).unwrap(), 100.0);
    }

    #[test]
    fn read_token_takes_the_first_word() {
        let mut c = console("\n  \nblue shirt\n");
        assert_eq!(c.read_token("> ").unwrap(), "blue");
    }

    #[test]
    fn exhausted_input_is_an_eof_error() {
        let mut c = console("");
        let err = c.read_line("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
