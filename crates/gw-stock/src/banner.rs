//! ASCII-art banners, one per bordered screen.
//!
//! Every line is exactly [`WIDTH`](crate::bordered::WIDTH) columns and
//! already carries the `|` frame on both sides.

/// Lines per banner.
pub const HEIGHT: usize = 6;

/// Main menu.
pub const MAIN: [&str; HEIGHT] = [
    r"|      .___  ___.      ___       __  .__   __.    .___  ___.  _______ .__   __.  __    __                                    |",
    r"|      |   \/   |     /   \     |  | |  \ |  |    |   \/   | |   ____||  \ |  | |  |  |  |                                   |",
    r"|      |  \  /  |    /  ^  \    |  | |   \|  |    |  \  /  | |  |__   |   \|  | |  |  |  |                                   |",
    r"|      |  |\/|  |   /  /_\  \   |  | |  .    |    |  |\/|  | |   __|  |  . '  | |  |  |  |                                   |",
    r"|      |  |  |  |  /  _____  \  |  | |  |\   |    |  |  |  | |  |____ |  |\   | |  '--'  |                                   |",
    r"|      |__|  |__| /__/     \__\ |__| |__| \__|    |__|  |__| |_______||__| \__|  \______/                                    |",
];

/// Add-vehicle screen.
pub const ADD_VEHICLE: [&str; HEIGHT] = [
    r"|           ___       _______   _______     ____    ____  _______  __    __   __    ______  __       _______                 |",
    r"|          /   \     |       \ |       \    \   \  /   / |   ____||  |  |  | |  |  /      ||  |     |   ____|                |",
    r"|         /  ^  \    |  .--.  ||  .--.  |    \   \/   /  |  |__   |  |__|  | |  | |  ,----'|  |     |  |__                   |",
    r"|        /  /_\  \   |  |  |  ||  |  |  |     \      /   |   __|  |   __   | |  | |  |     |  |     |   __|                  |",
    r"|       /  _____  \  |  '--'  ||  '--'  |      \    /    |  |____ |  |  |  | |  | |  '----.|  '----.|  |____                 |",
    r"|      /__/     \__\ |_______/ |_______/        \__/     |_______||__|  |__| |__|  \______||_______||_______|                |",
];

/// Remove-vehicle screen.
pub const REMOVE_VEHICLE: [&str; HEIGHT] = [
    r"|     .______       _______ .___  ___.   ______   ____    ____  _______                                                      |",
    r"|     |   _  \     |   ____||   \/   |  /  __  \  \   \  /   / |   ____|                                                     |",
    r"|     |  |_)  |    |  |__   |  \  /  | |  |  |  |  \   \/   /  |  |__                                                        |",
    r"|     |      /     |   __|  |  |\/|  | |  |  |  |   \      /   |   __|                                                       |",
    r"|     |  |\  \----.|  |____ |  |  |  | |  '--'  |    \    /    |  |____                                                      |",
    r"|     | _| '._____||_______||__|  |__|  \______/      \__/     |_______|                                                     |",
];

/// Inventory screen.
pub const VIEW_INVENTORY: [&str; HEIGHT] = [
    r"|      __  .__   __. ____    ____  _______ .__   __. .___________.  ______   .______     ____    ____                        |",
    r"|     |  | |  \ |  | \   \  /   / |   ____||  \ |  | |           | /  __  \  |   _  \    \   \  /   /                        |",
    r"|     |  | |   \|  |  \   \/   /  |  |__   |   \|  | '---|  |----'|  |  |  | |  |_)  |    \   \/   /                         |",
    r"|     |  | |  . '  |   \      /   |   __|  |  . '  |     |  |     |  |  |  | |      /      \_    _/                          |",
    r"|     |  | |  |\   |    \    /    |  |____ |  |\   |     |  |     |  '--'  | |  |\  \----.   |  |                            |",
    r"|     |__| |__| \__|     \__/     |_______||__| \__|     |__|      \______/  | _| '._____|   |__|                            |",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_is_framed_and_full_width() {
        for banner in [MAIN, ADD_VEHICLE, REMOVE_VEHICLE, VIEW_INVENTORY] {
            for line in banner {
                assert_eq!(line.chars().count(), crate::bordered::WIDTH, "{line}");
                assert!(line.starts_with('|') && line.ends_with('|'), "{line}");
            }
        }
    }
}
