#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_logout()
            || cmd.is_token_info()
            || cmd.is_export()
            || cmd.is_history_older()
            || cmd.is_history_newer()
            || cmd.is_clear_history()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_logout(&self) -> bool {
        return ["/logout"].contains(&self.command.as_str());
    }

    pub fn is_token_info(&self) -> bool {
        return ["/t", "/token"].contains(&self.command.as_str());
    }

    pub fn is_export(&self) -> bool {
        return ["/e", "/export"].contains(&self.command.as_str());
    }

    pub fn is_history_older(&self) -> bool {
        return ["/b", "/back"].contains(&self.command.as_str());
    }

    pub fn is_history_newer(&self) -> bool {
        return ["/f", "/fwd"].contains(&self.command.as_str());
    }

    pub fn is_clear_history(&self) -> bool {
        return ["/clearhistory"].contains(&self.command.as_str());
    }
}
