pub const APP_NAME: &str = "Team Chat";

// Limits
pub const MAX_MESSAGE_LENGTH: usize = 4000;
pub const MAX_WORKSPACE_NAME_LENGTH: usize = 100;
pub const MAX_CHANNEL_NAME_LENGTH: usize = 80;
pub const MAX_EMOJI_LENGTH: usize = 32;

// Invite codes
pub const INVITE_CODE_LENGTH: usize = 10;
pub const INVITE_CODE_ALPHABET: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

// Workspaces
pub const PERSONAL_WORKSPACE_DESCRIPTION: &str = "Your personal workspace";
