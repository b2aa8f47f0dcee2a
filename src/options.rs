use clap::ValueEnum;
use crossterm::style::Color;
use minroob_field::Player;

fn lerp(t: f32, x: f32, y: f32) -> u8 {
    (255.0 * ((1.0-t)*x + t*y)) as u8
}

pub struct Theme {
    pub bg_hidden: Color,
    pub bg_revealed: Color,
    pub nums: [Color; 9],
    pub blue: Color,
    pub red: Color,
    pub unselectable: Color,
    low: (f32, f32, f32),
    high: (f32, f32, f32),
}

impl Theme {
    /// Background for an unrevealed cell whose best estimate is `estimate`.
    pub fn estimate_color(&self, estimate: f32) -> Color {
        let t = estimate.clamp(0.0, 1.0);
        Color::Rgb {
            r: lerp(t, self.low.0, self.high.0),
            g: lerp(t, self.low.1, self.high.1),
            b: lerp(t, self.low.2, self.high.2),
        }
    }

    pub fn player_color(&self, player: Player) -> Color {
        match player {
            Player::Blue => self.blue,
            Player::Red => self.red,
        }
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

// clue colors from 0 up to 8, as the chat app tints its digits
const CHAT_NUMS: [Color; 9] = [
    rgb(170, 170, 170),
    rgb(84, 169, 235),
    rgb(94, 186, 125),
    rgb(225, 97, 97),
    rgb(162, 119, 222),
    rgb(230, 150, 60),
    rgb(70, 190, 200),
    rgb(210, 210, 210),
    rgb(240, 140, 190),
];

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Frappe,
    Chat,
    BlackAndWhite,
}

impl ThemeChoice {
    pub fn theme(self) -> Theme {
        match self {
            Self::Frappe => Theme {
                bg_hidden: rgb(48, 52, 70),
                bg_revealed: rgb(81, 87, 109),
                nums: [
                    rgb(165, 173, 206),
                    rgb(140, 170, 238),
                    rgb(166, 209, 137),
                    rgb(231, 130, 132),
                    rgb(202, 158, 230),
                    rgb(239, 159, 118),
                    rgb(129, 200, 190),
                    rgb(198, 208, 245),
                    rgb(244, 184, 228),
                ],
                blue: rgb(133, 193, 220),
                red: rgb(234, 153, 156),
                unselectable: rgb(35, 38, 52),
                low: (0.188, 0.203, 0.274),
                high: (0.898, 0.784, 0.564),
            },
            Self::Chat => Theme {
                bg_hidden: rgb(36, 47, 61),
                bg_revealed: rgb(23, 33, 43),
                nums: CHAT_NUMS,
                blue: rgb(64, 140, 255),
                red: rgb(240, 60, 60),
                unselectable: rgb(14, 22, 33),
                low: (0.141, 0.184, 0.239),
                high: (0.329, 0.662, 0.921),
            },
            Self::BlackAndWhite => Theme {
                bg_hidden: Color::Grey,
                bg_revealed: Color::AnsiValue(250),
                nums: [Color::Black; 9],
                blue: Color::DarkGrey,
                red: Color::Black,
                unselectable: Color::DarkGrey,
                low: (0.5, 0.5, 0.5),
                high: (1.0, 1.0, 1.0),
            },
        }
    }
}

pub struct IconSet {
    pub empty: char,
    pub marker: char,
    pub hidden: char,
    pub certain: char,
    pub chosen: char,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IconSetChoice {
    Ascii,
    Unicode,
}

impl IconSetChoice {
    pub fn iconset(self) -> IconSet {
        match self {
            Self::Ascii => IconSet {
                empty: '.',
                marker: '*',
                hidden: '#',
                certain: '!',
                chosen: '@',
            },
            Self::Unicode => IconSet {
                empty: ' ',
                marker: '●',
                hidden: '▪',
                certain: '‼',
                chosen: '◎',
            },
        }
    }
}
