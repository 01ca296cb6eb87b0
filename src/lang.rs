//! Localized UI strings: English, French, Mandarin Chinese.

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    French,
    Chinese,
}

/// Message keys. The discriminant is the row in [`TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    CurrentScore,
    YouLost,
    FinalScore,
    SelectDirection,
    UnknownDirection,
    WonMsg,
    Yes,
    Use,
    ClearError,
    ClearSuccess,
    HelpMsg,
    BestScore,
    QuitHint,
    PressAnyKey,
}

impl Message {
    pub const ALL: [Self; 14] = [
        Self::CurrentScore,
        Self::YouLost,
        Self::FinalScore,
        Self::SelectDirection,
        Self::UnknownDirection,
        Self::WonMsg,
        Self::Yes,
        Self::Use,
        Self::ClearError,
        Self::ClearSuccess,
        Self::HelpMsg,
        Self::BestScore,
        Self::QuitHint,
        Self::PressAnyKey,
    ];
}

impl Language {
    const fn column(self) -> usize {
        match self {
            Self::English => 0,
            Self::French => 1,
            Self::Chinese => 2,
        }
    }

    pub fn text(self, message: Message) -> &'static str {
        TABLE[message as usize][self.column()]
    }

    /// True if `c` answers "yes": `y` in any language, or the first letter of the localized word.
    pub fn is_yes(self, c: char) -> bool {
        let c = c.to_lowercase().next().unwrap_or(c);
        c == 'y' || self.text(Message::Yes).chars().next() == Some(c)
    }
}

const HELP_EN: &str = "\
usage: gravity-2048 [--help] [--azerty | --qwerty | --vim | --keys UDLR] [--english | --french | --chinese]
                    [--theme NAME] [--difficulty normal|hell] [--clear] [--best-score]

options:
    -h, --help            show the help page
  keys:
    --azerty              play with the Z S Q D keys
    --qwerty              play with the W S A D keys (default)
    --vim                 play with the VIM keys (K J H L)
    --keys UDLR           play with any four keys, given as up down left right
    --hint-layout NAME    key hint shape: cross, square, linear or custom
    --custom-hint PATTERN custom key hint, letters U D L R and spaces
  languages:
    --english, --en       set the language to English
    --french, --fr        set the language to French
    --chinese, --zh       set the language to Mandarin Chinese
  extras:
    --theme NAME          play with a custom theme (file path or name in the themes directory)
    --show-theme          print the colours of the theme and exit
    --difficulty DIFF     set the game difficulty (available: normal, hell)
    --width N, --height N grid size (2 to 8, default 4)
    --seed N              replay a game from a random seed
    --clear               delete saved data (best score)
    --best-score          print the best score of the local player

credits:
  the original 2048 was written by Gabriele Cirulli
";

const HELP_FR: &str = "\
utilisation: gravity-2048 [--help] [--azerty | --qwerty | --vim | --keys UDLR] [--english | --french | --chinese]
                          [--theme NOM] [--difficulty normal|hell] [--clear] [--best-score]

options:
    -h, --help            affiche cette page d'aide
  touches:
    --azerty              joue avec les touches Z S Q D
    --qwerty              joue avec les touches W S A D (par défaut)
    --vim                 joue avec les touches VIM (K J H L)
    --keys HBGD           joue avec quatre touches au choix: haut bas gauche droite
    --hint-layout NOM     forme de l'aide des touches: cross, square, linear ou custom
    --custom-hint MOTIF   aide personnalisée, lettres U D L R et espaces
  langues:
    --english, --en       règle la langue sur Anglais
    --french, --fr        règle la langue sur Français
    --chinese, --zh       règle la langue sur Mandarin
  extras:
    --theme NOM           joue avec un thème personnalisé (chemin ou nom dans le dossier themes)
    --show-theme          affiche les couleurs du thème et quitte
    --difficulty DIFF     règle la difficulté de la partie (disponibles: normal, hell)
    --width N, --height N taille de la grille (2 à 8, 4 par défaut)
    --seed N              rejoue une partie à partir d'une graine
    --clear               supprime les données enregistrées (meilleur score)
    --best-score          affiche le meilleur score du joueur local

crédits:
  le 2048 original a été écrit par Gabriele Cirulli
";

const HELP_ZH: &str = "\
用法: gravity-2048 [--help] [--azerty | --qwerty | --vim | --keys UDLR] [--english | --french | --chinese]
                   [--theme 名称] [--difficulty normal|hell] [--clear] [--best-score]

选项:
    -h, --help            显示此帮助页面
  按键:
    --azerty              用 Z S Q D 键作为方向键
    --qwerty              用 W S A D 键作为方向键（默认）
    --vim                 用 VIM 方向键（K J H L）
    --keys UDLR           自定义四个方向键：上 下 左 右
    --hint-layout 名称    按键提示形状: cross, square, linear 或 custom
    --custom-hint 图案    自定义按键提示，字母 U D L R 和空格
  语言:
    --english, --en       将语言设置为英语
    --french, --fr        将语言设置为法语
    --chinese, --zh       将语言设置为普通话
  更多:
    --theme 名称          使用自定义主题（文件路径或主题文件夹中的名称）
    --show-theme          显示主题颜色后退出
    --difficulty 难度     设置游戏难度 (可用: normal, hell)
    --width N, --height N 网格大小（2 到 8，默认 4）
    --seed N              用随机种子重玩一局
    --clear               删除保存的数据（最佳成绩）
    --best-score          打印本地玩家的最好成绩

学分:
  原版 2048 的作者是加布里埃尔-西鲁利（Gabriele Cirulli）
";

/// Rows follow [`Message`] order; columns are English, French, Chinese.
const TABLE: [[&str; 3]; Message::ALL.len()] = [
    ["Current score", "Score actuel", "当前得分"],
    ["You lost.", "Vous avez perdu.", "你输了"],
    ["Final score", "Score final", "最后得分"],
    ["Select a direction", "Choisissez une direction", "选择方向"],
    ["Unknown direction", "Direction inconnue", "方向不明"],
    [
        "You won! Do you want to continue? (yes/no)",
        "Vous avez gagné! Voulez-vous continuer? (oui/non)",
        "您赢了！还想继续吗？(是的/没有)",
    ],
    ["yes", "oui", "是的"],
    ["Use these keys:", "Touches directionnelles:", "方向键:"],
    [
        "There was an error while deleting user data.",
        "Il y a eu une erreur lors de la suppression des données utilisateur.",
        "删除用户数据时出现错误",
    ],
    [
        "User data successfully deleted!",
        "Données utilisateur supprimées avec succès!",
        "用户数据已成功删除！",
    ],
    [HELP_EN, HELP_FR, HELP_ZH],
    ["Best score", "Meilleur score", "最佳成绩"],
    ["Esc: quit", "Échap: quitter", "Esc: 退出"],
    ["Press any key", "Appuyez sur une touche", "按任意键"],
];
