use crate::config::FolderTokens;

/// Joins the fields of one record (ASCII unit separator)
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Terminates each record (ASCII record separator)
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// Maximum number of characters kept from a message body
pub const CONTENT_LIMIT: usize = 500;

// Field values are scrubbed of both separator characters before being
// emitted, so message text cannot shift record boundaries.
const TEMPLATE: &str = r#"on run argv
	set outputPath to item 1 of argv
	set fieldSep to character id 31
	set recordSep to character id 30
	set folderTokens to %FOLDER_TOKENS%
	set scanCap to %SCAN_CAP%
	set contentLimit to %CONTENT_LIMIT%
	set emailData to ""

	tell application "Microsoft Outlook"
		set allAccounts to {}
		try
			set allAccounts to allAccounts & (every exchange account)
		end try
		try
			set allAccounts to allAccounts & (every imap account)
		end try
		try
			set allAccounts to allAccounts & (every pop account)
		end try

		repeat with acct in allAccounts
			set acctFolders to {}
			try
				set acctFolders to mail folders of acct
			end try

			repeat with mailFolder in acctFolders
				try
					set folderName to name of mailFolder
					if my matchesToken(folderName, folderTokens) then
						set folderMessages to messages of mailFolder
						set msgCount to count of folderMessages
						if msgCount > scanCap then set msgCount to scanCap

						repeat with i from 1 to msgCount
							set msg to item i of folderMessages

							set msgSubject to ""
							try
								set msgSubject to my scrub(subject of msg)
							end try

							set msgSender to ""
							try
								set senderName to name of (sender of msg)
								if senderName is missing value or senderName is "" then error "no display name"
								set msgSender to my scrub(senderName)
							on error
								try
									set msgSender to my scrub(address of (sender of msg))
								end try
							end try

							set msgReceived to ""
							try
								set msgReceived to my scrub((time received of msg) as string)
							end try

							set msgContent to ""
							try
								set msgContent to my clip(my scrub(plain text content of msg), contentLimit)
							end try

							set emailData to emailData & my scrub(folderName) & fieldSep & msgSubject & fieldSep & msgSender & fieldSep & msgReceived & fieldSep & msgContent & recordSep
						end repeat
					end if
				end try
			end repeat
		end repeat
	end tell

	set fileRef to open for access (POSIX file outputPath) with write permission
	try
		set eof of fileRef to 0
		write emailData to fileRef as «class utf8»
	on error errMsg number errNum
		close access fileRef
		error errMsg number errNum
	end try
	close access fileRef
end run

on matchesToken(folderName, folderTokens)
	considering case
		repeat with tok in folderTokens
			if folderName contains (tok as string) then return true
		end repeat
	end considering
	return false
end matchesToken

on scrub(value)
	if value is missing value then return ""
	set value to value as string
	set savedDelimiters to AppleScript's text item delimiters
	set AppleScript's text item delimiters to {character id 30, character id 31}
	set parts to text items of value
	set AppleScript's text item delimiters to " "
	set value to parts as string
	set AppleScript's text item delimiters to savedDelimiters
	return value
end scrub

on clip(value, limit)
	if (length of value) > limit then return text 1 thru limit of value
	return value
end clip
"#;

/// Render the extraction script for the given folder tokens and per-folder cap
pub fn render_script(tokens: &FolderTokens, scan_cap: usize) -> String {
    TEMPLATE
        .replace("%FOLDER_TOKENS%", &applescript_list(tokens.tokens()))
        .replace("%SCAN_CAP%", &scan_cap.to_string())
        .replace("%CONTENT_LIMIT%", &CONTENT_LIMIT.to_string())
}

fn applescript_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.map(applescript_string).collect();
    format!("{{{}}}", quoted.join(", "))
}

fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
