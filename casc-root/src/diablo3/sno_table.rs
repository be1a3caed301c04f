//! The 70-entry SNO group table: `{group-name, 3-char extension}` by group id.
//!
//! Groups with no known name/extension fall back to a generated
//! `AssetXY`/`aXY` pair, per the synthesis rules.

pub const GROUP_COUNT: usize = 70;

/// `(group_name, extension)` indexed by group id; `None` for groups with
/// no confirmed mapping.
const TABLE: [Option<(&str, &str)>; GROUP_COUNT] = [
    None,                          // 0
    Some(("Adventure", "adv")),    // 1
    Some(("AiBehavior", "aib")),   // 2
    Some(("AiState", "ais")),      // 3
    Some(("Actor", "acr")),        // 4
    Some(("AmbientSound", "ams")), // 5
    Some(("Anim", "ani")),         // 6
    Some(("Anim2D", "an2")),       // 7
    Some(("AnimSet", "ans")),      // 8
    Some(("Appearance", "app")),   // 9
    Some(("Hero", "hro")),         // 10
    Some(("Cloth", "clt")),        // 11
    Some(("Conversation", "cnv")), // 12
    Some(("Textures", "tex")),     // 13
    Some(("ConversationList", "cnl")), // 14
    Some(("EffectGroup", "efg")),  // 15
    Some(("Encounter", "enc")),    // 16
    Some(("Explosion", "xpl")),    // 17
    Some(("FlagSet", "flg")),      // 18
    Some(("Font", "fnt")),         // 19
    Some(("GameBalance", "gam")),  // 20
    Some(("Globals", "glo")),      // 21
    Some(("LevelArea", "lvl")),    // 22
    Some(("LevelDef", "lvd")),     // 23
    Some(("Light", "lit")),        // 24
    Some(("MarkerSet", "mrk")),    // 25
    Some(("Monster", "mon")),      // 26
    Some(("Worlds", "wrl")),       // 27
    Some(("Observer", "obs")),     // 28
    Some(("Particle", "prt")),     // 29
    Some(("Physics", "phy")),      // 30
    Some(("Power", "pow")),        // 31
    Some(("Quest", "qst")),        // 32
    Some(("Rope", "rop")),         // 33
    Some(("Scene", "scn")),        // 34
    Some(("SceneGroup", "scg")),   // 35
    Some(("Script", "scr")),       // 36
    Some(("ShaderMap", "shm")),    // 37
    Some(("Shaders", "shd")),      // 38
    Some(("SoundBank", "sbk")),    // 39
    Some(("Shakes", "shk")),       // 40
    Some(("SkillKit", "skl")),     // 41
    Some(("Sound", "snd")),        // 42
    Some(("StringList", "stl")),   // 43
    Some(("Surface", "srf")),      // 44
    Some(("Trail", "trl")),        // 45
    Some(("UI", "uix")),           // 46
    Some(("Weather", "wth")),      // 47
    Some(("Recipe", "rcp")),       // 48
    Some(("Condition", "cnd")),    // 49
    Some(("TreasureClass", "trc")), // 50
    Some(("Account", "acc")),      // 51
    Some(("Act", "act")),          // 52
    Some(("Material", "mat")),     // 53
    Some(("Cursor", "cur")),       // 54
    Some(("Environment", "env")),  // 55
    Some(("VectorField", "vec")),  // 56
    Some(("RagdollImpact", "rag")), // 57
    Some(("SpeedTree", "spd")),    // 58
    None,                          // 59
    Some(("Weapon", "wpn")),       // 60
    Some(("Armor", "arm")),        // 61
    Some(("OnKillReward", "okr")), // 62
    Some(("Music", "mus")),        // 63
    None,                          // 64
    Some(("BossEncounter", "bos")), // 65
    Some(("ControlScheme", "ctl")), // 66
    Some(("GenericProxy", "gnp")),  // 67
    Some(("MarketData", "mkt")),    // 68
    None,                          // 69
];

/// Resolve `(group_name, extension)` for a group id, falling back to the
/// generated `AssetXY`/`aXY` pair for unmapped or out-of-range ids.
pub fn group_name_and_ext(group_id: u32) -> (String, String) {
    TABLE
        .get(group_id as usize)
        .copied()
        .flatten()
        .map(|(name, ext)| (name.to_string(), ext.to_string()))
        .unwrap_or_else(|| (format!("Asset{group_id:02}"), format!("a{group_id:02}")))
}
