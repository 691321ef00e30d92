use crate::domain::model::MenuEntry;

pub const VALENTINE: MenuEntry = MenuEntry {
    id: "valentine",
    name: "발렌타인 디너",
    description: "연인을 위한 낭만적인 코스입니다.",
};

pub const FRENCH: MenuEntry = MenuEntry {
    id: "french",
    name: "프렌치 디너",
    description: "격식 있는 가족 모임, 우아한 축하 자리에 어울리는 코스입니다.",
};

pub const ENGLISH: MenuEntry = MenuEntry {
    id: "english",
    name: "잉글리시 디너",
    description: "브런치 스타일의 든든한 한 끼입니다.",
};

pub const CHAMPAGNE: MenuEntry = MenuEntry {
    id: "champagne",
    name: "샴페인 축제 디너",
    description: "생일이나 파티에 최적인 샴페인 포함 코스입니다.",
};

pub const MENU_CATALOG: [MenuEntry; 4] = [VALENTINE, FRENCH, ENGLISH, CHAMPAGNE];

pub const SERVING_STYLES: [&str; 3] = ["심플 스타일", "디럭스 스타일", "그랜드 스타일"];

pub fn find_menu(id: &str) -> Option<&'static MenuEntry> {
    MENU_CATALOG.iter().find(|entry| entry.id == id)
}

/// The catalog entry whose display name appears in `text`, if any.
pub fn menu_mentioned_in(text: &str) -> Option<&'static MenuEntry> {
    MENU_CATALOG.iter().find(|entry| text.contains(entry.name))
}

pub fn style_mentioned_in(text: &str) -> Option<&'static str> {
    SERVING_STYLES.iter().copied().find(|style| text.contains(style))
}
