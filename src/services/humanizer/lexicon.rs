// Lexicon
// Synonym, misspelling, contraction and keyboard tables shared by the rewriting stages.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const SYNONYMS: &[(&str, &[&str])] = &[
    // Verbs
    ("use", &["utilize", "employ", "apply", "execute", "exercise", "implement", "deploy", "avail oneself of", "put into service", "make use of", "bring to bear"]),
    ("make", &["create", "produce", "develop", "generate", "form", "construct", "build", "craft", "fashion", "fabricate", "forge", "synthesize", "manufacture", "formulate"]),
    ("say", &["state", "declare", "assert", "maintain", "articulate", "pronounce", "propound", "express", "voice", "utter", "enunciate", "intimate", "verbalize", "profess"]),
    ("think", &["consider", "contemplate", "deliberate", "ponder", "reflect", "ruminate", "cogitate", "meditate", "muse", "speculate", "conceive", "conceptualize", "apprehend"]),
    ("know", &["understand", "comprehend", "apprehend", "grasp", "recognize", "discern", "perceive", "appreciate", "cognize", "fathom", "be cognizant of", "be apprised of"]),
    ("see", &["observe", "perceive", "discern", "distinguish", "descry", "behold", "regard", "note", "detect", "witness", "ascertain", "espy", "contemplate", "scrutinize"]),
    ("get", &["obtain", "acquire", "procure", "secure", "attain", "gain", "come by", "derive", "realize", "achieve", "accomplish", "come into possession of", "requisition"]),
    ("go", &["proceed", "advance", "progress", "traverse", "journey", "repair", "betake oneself", "withdraw", "retire", "depart", "make one's way", "peregrinate", "sojourn"]),
    ("come", &["arrive", "approach", "reach", "materialize", "emerge", "appear", "present oneself", "manifest", "become apparent", "make an appearance", "draw near"]),
    ("find", &["discover", "uncover", "detect", "locate", "discern", "perceive", "ascertain", "determine", "establish", "encounter", "light upon", "happen upon", "stumble upon"]),
    ("give", &["provide", "furnish", "supply", "offer", "bestow", "confer", "present", "grant", "allocate", "dispense", "distribute", "accord", "impart", "vouchsafe"]),
    ("take", &["grasp", "seize", "appropriate", "assume", "adopt", "receive", "accept", "obtain", "acquire", "procure", "secure", "come into possession of", "apprehend"]),
    ("want", &["desire", "wish", "crave", "covet", "long for", "yearn for", "aspire to", "pine for", "hanker after", "be desirous of", "solicit", "request", "entreat"]),
    ("look", &["appear", "seem", "examine", "scrutinize", "inspect", "survey", "peruse", "study", "assess", "evaluate", "investigate", "analyze", "appraise", "regard"]),
    ("need", &["require", "necessitate", "call for", "demand", "be in want of", "be deficient in", "lack", "be bereft of", "want for", "be in need of", "stand in need of"]),
    ("feel", &["sense", "experience", "perceive", "be conscious of", "be aware of", "discern", "apprehend", "intuit", "be sensible of", "be cognizant of", "register"]),
    ("try", &["attempt", "endeavor", "strive", "venture", "essay", "undertake", "seek", "aim", "aspire", "make an effort", "make an attempt", "exert oneself", "take pains"]),
    ("tell", &["recount", "narrate", "relate", "recite", "describe", "portray", "delineate", "depict", "chronicle", "detail", "expound", "elucidate", "explicate", "unfold"]),
    ("ask", &["inquire", "question", "interrogate", "query", "solicit", "petition", "entreat", "implore", "beseech", "request", "demand", "require", "seek to know"]),
    ("work", &["function", "operate", "perform", "labor", "toil", "exert", "struggle", "strive", "plug away"]),
    ("seem", &["appear", "look", "give the impression of", "come across as", "strike one as", "feel like"]),
    ("call", &["name", "term", "label", "refer to", "designate", "dub", "title", "address as"]),
    ("let", &["allow", "permit", "enable", "authorize", "sanction", "grant", "consent to"]),
    // Nouns
    ("person", &["individual", "entity", "being", "personage", "character", "soul", "mortal", "subject", "specimen", "figure", "denizen", "constituent"]),
    ("part", &["portion", "segment", "section", "component", "constituent", "element", "division", "fragment", "fraction", "subdivision", "subsection", "parcel", "particle"]),
    ("many", &["numerous", "several", "various", "multiple", "countless", "myriad", "abundant", "plentiful"]),
    ("people", &["individuals", "persons", "folks", "humans", "citizens", "community", "public", "population", "crowd"]),
    ("time", &["period", "duration", "era", "moment", "instance", "occasion", "interval", "phase", "span"]),
    ("way", &["method", "approach", "technique", "manner", "style", "fashion", "mode", "procedure", "means"]),
    ("place", &["location", "spot", "site", "area", "position", "venue", "locale", "region", "vicinity"]),
    ("thing", &["object", "item", "article", "entity", "element", "piece", "component", "matter", "subject"]),
    ("idea", &["concept", "notion", "thought", "theory", "view", "belief", "opinion", "perspective", "standpoint"]),
    ("result", &["outcome", "consequence", "effect", "impact", "upshot", "aftermath", "conclusion", "end result"]),
    ("example", &["instance", "case", "illustration", "sample", "specimen", "demonstration", "model", "exemplar"]),
    ("problem", &["issue", "difficulty", "trouble", "obstacle", "challenge", "dilemma", "complication", "predicament"]),
    // Adjectives
    ("good", &["great", "excellent", "fine", "decent", "solid", "wonderful", "terrific", "superb", "fantastic"]),
    ("bad", &["poor", "terrible", "awful", "disappointing", "dreadful", "lousy", "inferior", "inadequate"]),
    ("big", &["large", "huge", "enormous", "substantial", "sizable", "massive", "gigantic", "immense"]),
    ("small", &["tiny", "little", "compact", "minor", "miniature", "slight", "petite", "diminutive"]),
    ("important", &["significant", "crucial", "essential", "key", "vital", "critical", "fundamental", "necessary"]),
    ("happy", &["glad", "pleased", "delighted", "content", "joyful", "cheerful", "thrilled", "elated"]),
    ("sad", &["unhappy", "disappointed", "upset", "down", "blue", "depressed", "glum", "gloomy", "miserable"]),
    ("interesting", &["intriguing", "fascinating", "engaging", "captivating", "compelling", "absorbing", "enthralling"]),
    ("difficult", &["challenging", "hard", "tough", "demanding", "arduous", "strenuous", "tricky", "problematic"]),
    ("easy", &["simple", "straightforward", "effortless", "uncomplicated", "painless", "manageable", "smooth"]),
    ("beautiful", &["attractive", "gorgeous", "stunning", "lovely", "pretty", "exquisite", "splendid", "handsome"]),
    ("fast", &["quick", "rapid", "swift", "speedy", "brisk", "prompt", "hasty", "expeditious", "nimble"]),
    ("slow", &["gradual", "unhurried", "leisurely", "steady", "sluggish", "plodding", "deliberate", "languid"]),
    ("new", &["recent", "fresh", "novel", "modern", "current", "contemporary", "latest", "up-to-date"]),
    ("old", &["ancient", "aged", "vintage", "antique", "outdated", "elderly", "venerable", "traditional"]),
    ("full", &["complete", "whole", "entire", "packed", "filled", "loaded", "crowded", "crammed"]),
    ("empty", &["vacant", "hollow", "bare", "clear", "unfilled", "depleted", "void", "barren"]),
    ("high", &["tall", "elevated", "lofty", "towering", "soaring", "steep", "considerable", "substantial"]),
    ("low", &["short", "small", "slight", "modest", "insignificant", "minimal", "minor", "diminished"]),
    // Connectives
    ("but", &["however", "nevertheless", "nonetheless", "yet", "still", "notwithstanding", "on the contrary", "conversely", "in contrast", "all the same", "be that as it may"]),
    ("also", &["moreover", "furthermore", "additionally", "in addition", "besides", "likewise", "similarly", "correspondingly", "equally", "comparably", "analogously"]),
    ("so", &["consequently", "therefore", "thus", "accordingly", "hence", "ergo", "as a result", "subsequently", "thereupon", "in consequence", "wherefore"]),
    ("because", &["since", "for", "as", "inasmuch as", "owing to", "by virtue of", "in view of", "on account of", "by reason of", "due to the fact that", "in light of"]),
    ("if", &["provided that", "assuming that", "on condition that", "in the event that", "supposing that", "granted that", "presuming that", "in case", "contingent upon"]),
    ("and", &["moreover", "furthermore", "additionally", "also", "besides", "as well as", "together with", "along with", "in conjunction with", "coupled with", "in tandem with"]),
    ("while", &["whereas", "whilst", "although", "though", "even though", "notwithstanding that", "despite the fact that", "in spite of the fact that", "albeit"]),
    // Adverbs
    ("very", &["extremely", "highly", "exceptionally", "incredibly", "remarkably", "particularly", "decidedly", "notably"]),
    ("really", &["truly", "genuinely", "actually", "honestly", "definitely", "certainly", "absolutely", "indeed"]),
    ("quite", &["rather", "fairly", "pretty", "somewhat", "reasonably", "relatively", "moderately", "considerably"]),
    ("almost", &["nearly", "virtually", "practically", "just about", "all but", "not quite", "on the verge of"]),
    ("much", &["a great deal", "a lot", "considerably", "substantially", "significantly", "a good deal", "plenty"]),
    ("well", &["thoroughly", "skillfully", "capably", "competently", "expertly", "adeptly", "effectively"]),
    ("just", &["simply", "merely", "only", "barely", "hardly", "scarcely", "solely", "exclusively"]),
    ("often", &["frequently", "commonly", "repeatedly", "regularly", "routinely", "habitually", "time and again"]),
    ("sometimes", &["occasionally", "now and then", "from time to time", "at times", "periodically", "once in a while"]),
    ("rarely", &["seldom", "infrequently", "hardly ever", "not often", "on rare occasions", "sporadically"]),
    ("always", &["consistently", "continually", "constantly", "perpetually", "eternally", "forever", "endlessly"]),
];

/// Correct root and its misspelled form. Longer roots come first so they win over their prefixes.
pub const MISSPELLINGS: &[(&str, &str)] = &[
    ("accommod", "accomod"),
    ("achieve", "acheive"),
    ("acquir", "aquir"),
    ("aggress", "agress"),
    ("apparent", "apparant"),
    ("arctic", "artic"),
    ("argument", "arguement"),
    ("atheist", "athiest"),
    ("bizarre", "bizzare"),
    ("business", "buisness"),
    ("calendar", "calender"),
    ("categor", "catagor"),
    ("cemetery", "cemetary"),
    ("colleague", "collegue"),
    ("column", "colum"),
    ("commitment", "committment"),
    ("congratul", "congrat"),
    ("consensus", "concensus"),
    ("conscious", "concious"),
    ("decision", "descision"),
    ("definite", "definate"),
    ("develop", "develope"),
    ("diction", "dicton"),
    ("disappoint", "dissapoint"),
    ("disastrous", "disasterous"),
    ("eighth", "eigth"),
    ("embarrass", "embarass"),
    ("environment", "enviroment"),
    ("especial", "expecial"),
    ("except", "exept"),
    ("existence", "existance"),
    ("familiar", "familar"),
    ("final", "fianl"),
    ("fluorescent", "flourescent"),
    ("foreign", "foriegn"),
    ("friend", "freind"),
    ("government", "goverment"),
    ("grammar", "grammer"),
    ("guard", "gaurd"),
    ("happen", "hapen"),
    ("harass", "harrass"),
    ("height", "hieght"),
    ("hierarchy", "heirarchy"),
    ("hygiene", "hygene"),
    ("independent", "independant"),
    ("intelligence", "intelligance"),
    ("interest", "intrest"),
    ("interrupt", "interupt"),
    ("irrelevant", "irrelevent"),
    ("judgment", "judgement"),
    ("knowledge", "knowlege"),
    ("leisure", "liesure"),
    ("liaison", "liason"),
    ("library", "libary"),
    ("license", "lisence"),
    ("maintenance", "maintainance"),
    ("maneuver", "manuever"),
    ("memor", "memmor"),
    ("millennium", "millenium"),
    ("minut", "minit"),
    ("mischievous", "mischevious"),
    ("necessary", "neccessary"),
    ("neighbor", "nieghbor"),
    ("noticeable", "noticable"),
    ("occasion", "ocassion"),
    ("occurrence", "occurence"),
    ("occur", "ocurr"),
    ("offense", "offence"),
    ("opposit", "oposit"),
    ("parallel", "paralel"),
    ("parliament", "parliment"),
    ("pattern", "patern"),
    ("persistent", "persistant"),
    ("personnel", "personel"),
    ("phenomenon", "phenomemon"),
    ("possess", "posess"),
    ("potato", "potatoe"),
    ("precede", "preceed"),
    ("prefer", "preffer"),
    ("privilege", "priviledge"),
    ("probably", "probly"),
    ("professor", "proffessor"),
    ("pronunci", "pronounci"),
    ("psychology", "pyschology"),
    ("publicly", "publically"),
    ("questionnaire", "questionaire"),
    ("receipt", "reciept"),
    ("receive", "recieve"),
    ("recommend", "recomend"),
    ("reference", "referance"),
    ("relevant", "relevent"),
    ("relief", "releif"),
    ("religious", "religous"),
    ("repetit", "repitit"),
    ("restaurant", "restarant"),
    ("rhythm", "rythm"),
    ("schedule", "schedual"),
    ("secretary", "secratary"),
    ("separate", "seperate"),
    ("sergeant", "sargent"),
    ("significance", "significence"),
    ("similar", "similer"),
    ("someone", "somone"),
    ("specifically", "spefically"),
    ("subtle", "subtel"),
    ("success", "sucess"),
    ("sudden", "suddin"),
    ("surprise", "suprise"),
    ("technique", "tecnique"),
    ("temperature", "temprature"),
    ("temporary", "temprary"),
    ("themselves", "themselfs"),
    ("threshold", "threshhold"),
    ("tomorrow", "tommorow"),
    ("twelfth", "twelth"),
    ("typical", "typicly"),
    ("until", "untill"),
    ("vacation", "vaccation"),
    ("vaccin", "vacin"),
    ("vacuum", "vaccuum"),
    ("vehicle", "vehical"),
    ("vicious", "visious"),
    ("weather", "wether"),
    ("wednesday", "wenesday"),
    ("weird", "wierd"),
    ("writing", "writting"),
    ("yacht", "yatch"),
];

/// Whole-word phrase and its contraction, applied in order.
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("it is", "it's"),
    ("that is", "that's"),
    ("I am", "I'm"),
    ("you are", "you're"),
    ("we are", "we're"),
    ("they are", "they're"),
    ("will not", "won't"),
    ("can not", "can't"),
    ("cannot", "can't"),
    ("should not", "shouldn't"),
    ("could not", "couldn't"),
    ("would not", "wouldn't"),
    ("do not", "don't"),
    ("does not", "doesn't"),
    ("did not", "didn't"),
    ("have not", "haven't"),
    ("has not", "hasn't"),
    ("had not", "hadn't"),
    ("I will", "I'll"),
    ("you will", "you'll"),
    ("he will", "he'll"),
    ("she will", "she'll"),
    ("we will", "we'll"),
    ("they will", "they'll"),
    ("I would", "I'd"),
    ("you would", "you'd"),
    ("he would", "he'd"),
    ("she would", "she'd"),
    ("we would", "we'd"),
    ("they would", "they'd"),
    ("let us", "let's"),
    ("it will", "it'll"),
    ("who is", "who's"),
    ("what is", "what's"),
    ("where is", "where's"),
    ("when is", "when's"),
    ("why is", "why's"),
    ("how is", "how's"),
    ("who have", "who've"),
    ("what have", "what've"),
    ("where have", "where've"),
    ("when have", "when've"),
    ("why have", "why've"),
    ("how have", "how've"),
    ("who would", "who'd"),
    ("what would", "what'd"),
    ("where would", "where'd"),
    ("when would", "when'd"),
    ("why would", "why'd"),
    ("how would", "how'd"),
    ("I have", "I've"),
    ("you have", "you've"),
    ("we have", "we've"),
    ("they have", "they've"),
    ("could have", "could've"),
    ("should have", "should've"),
    ("would have", "would've"),
    ("might have", "might've"),
    ("must have", "must've"),
];

/// Lower-case QWERTY key and the keys a finger is likely to slip onto.
pub const KEYBOARD_NEIGHBORS: &[(char, &str)] = &[
    ('a', "as"), ('b', "v"), ('c', "x"), ('d', "sf"), ('e', "rw"), ('f', "gd"),
    ('g', "hf"), ('h', "gj"), ('i', "uo"), ('j', "kh"), ('k', "lj"), ('l', "k"),
    ('m', "n"), ('n', "m"), ('o', "ip"), ('p', "o"), ('q', "w"), ('r', "et"),
    ('s', "ad"), ('t', "ry"), ('u', "yi"), ('v', "b"), ('w', "qe"), ('x', "zc"),
    ('y', "tu"), ('z', "x"),
];

/// Whole-word misspellings sprinkled over finished paragraphs at the highest levels.
pub const HUMAN_TYPOS: &[(&str, &str)] = &[
    ("their", "thier"),
    ("receive", "recieve"),
    ("weird", "wierd"),
    ("believe", "beleive"),
    ("separate", "seperate"),
    ("definitely", "definately"),
    ("necessary", "neccessary"),
    ("occurred", "occured"),
    ("beginning", "begining"),
    ("successful", "succesful"),
    ("immediately", "immediatly"),
    ("occasionally", "ocasionally"),
    ("recommend", "recomend"),
    ("environment", "enviroment"),
    ("restaurant", "restaraunt"),
    ("probably", "probly"),
    ("surprise", "suprise"),
    ("library", "libary"),
    ("different", "diffrent"),
    ("basically", "basicly"),
];

/// Typo and the spelling it is corrected to.
pub const TYPO_CORRECTIONS: &[(&str, &str)] = &[
    ("teh", "the"),
    ("thier", "their"),
    ("recieve", "receive"),
    ("wierd", "weird"),
    ("alot", "a lot"),
    ("definately", "definitely"),
    ("seperate", "separate"),
    ("occured", "occurred"),
    ("recomend", "recommend"),
    ("accomodate", "accommodate"),
    ("irregardless", "regardless"),
    ("grammer", "grammar"),
    ("greatful", "grateful"),
    ("suprise", "surprise"),
    ("yeild", "yield"),
    ("truely", "truly"),
    ("tommorow", "tomorrow"),
    ("goverment", "government"),
    ("neccessary", "necessary"),
    ("teh same", "the same"),
    ("shoulds", "should"),
    ("ofcourse", "of course"),
];

fn synonym_index() -> &'static HashMap<&'static str, &'static [&'static str]> {
    static INDEX: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    INDEX.get_or_init(|| SYNONYMS.iter().copied().collect())
}

/// Synonyms for `word` (case-insensitive). Empty when the word is unknown.
pub fn synonyms_for(word: &str) -> &'static [&'static str] {
    synonym_index()
        .get(word.to_lowercase().as_str())
        .copied()
        .unwrap_or(&[])
}

/// Keys adjacent to `ch` on a QWERTY layout, or `None` for non-letters.
pub fn keyboard_neighbors(ch: char) -> Option<&'static str> {
    let lower = ch.to_ascii_lowercase();
    KEYBOARD_NEIGHBORS
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, neighbors)| *neighbors)
}

/// Compiled whole-word, case-insensitive matchers for [`CONTRACTIONS`].
pub fn contraction_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        CONTRACTIONS
            .iter()
            .map(|(phrase, contraction)| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
                (Regex::new(&pattern).expect("contraction regex"), *contraction)
            })
            .collect()
    })
}

/// Compiled case-insensitive matchers for [`HUMAN_TYPOS`].
pub fn human_typo_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        HUMAN_TYPOS
            .iter()
            .map(|(correct, wrong)| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(correct));
                (Regex::new(&pattern).expect("human typo regex"), *wrong)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_lookup_is_case_insensitive() {
        assert!(synonyms_for("Happy").contains(&"glad"));
        assert!(synonyms_for("PROBLEM").contains(&"issue"));
        assert!(synonyms_for("zebra").is_empty());
    }

    #[test]
    fn test_later_definitions_win() {
        // "work" appears as a verb sense only
        assert_eq!(synonyms_for("work")[0], "function");
        assert_eq!(synonyms_for("good")[0], "great");
    }

    #[test]
    fn test_misspellings_are_root_aligned() {
        for (correct, wrong) in MISSPELLINGS {
            assert!(correct.len() > 3, "{correct}");
            assert_ne!(correct, wrong);
            assert!(correct.chars().all(|c| c.is_ascii_lowercase()));
        }
        let occur = MISSPELLINGS.iter().position(|(c, _)| *c == "occur");
        let occurrence = MISSPELLINGS.iter().position(|(c, _)| *c == "occurrence");
        assert!(occurrence < occur);
    }

    #[test]
    fn test_keyboard_neighbors() {
        assert_eq!(keyboard_neighbors('q'), Some("w"));
        assert_eq!(keyboard_neighbors('E'), Some("rw"));
        assert_eq!(keyboard_neighbors('7'), None);
    }

    #[test]
    fn test_human_typos_skip_longer_words() {
        let (different, _) = human_typo_rules()
            .iter()
            .find(|(_, wrong)| *wrong == "diffrent")
            .unwrap();
        assert!(different.is_match("Different again"));
        assert!(!different.is_match("quite indifferent"));
        assert!(!different.is_match("differently"));
    }

    #[test]
    fn test_contraction_rules_match_whole_words() {
        let (re, contraction) = &contraction_rules()[0];
        assert_eq!(*contraction, "it's");
        assert!(re.is_match("It is late"));
        assert!(!re.is_match("bit isolated"));
    }
}
