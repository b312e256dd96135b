//! # Lexicons
//!
//! Fixed Italian/English word lists backing the rule-based analytics. Entries
//! are lowercase; multi-word entries are matched as substrings of the
//! lowercased text by the relevance classifier.

use std::collections::HashSet;
use std::sync::LazyLock;

pub const STOP_WORDS_LIST: &[&str] = &[
    // English
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "him", "his", "how", "its", "may", "now", "see", "two",
    "way", "who", "did", "get", "got", "let", "say", "she", "too", "use", "this", "that", "with",
    "from", "they", "been", "were", "what", "when", "where", "which", "while", "will", "would",
    "could", "should", "there", "their", "them", "then", "than", "these", "those", "into",
    "over", "only", "just", "also", "very", "really", "some", "such", "more", "most", "other",
    "about", "after", "before", "again", "because", "being", "does", "doing", "each", "few",
    "here", "much", "must", "own", "same", "your", "yours", "myself", "ourselves", "yourself",
    "himself", "herself", "itself", "themselves", "don", "didn", "doesn", "isn", "wasn", "won",
    "aren", "weren", "haven", "hasn", "wouldn", "couldn", "shouldn", "ever", "even", "still",
    "every", "many", "something", "anything", "nothing", "thing", "things", "lot", "lots",
    "like", "since", "until", "though", "through", "under", "above", "below", "between",
    "both", "either", "neither", "why", "yet", "off", "via", "upon", "onto", "whom",
    "whose", "able", "done", "make", "made", "makes", "going", "gets", "keep", "keeps", "time",
    "times", "day", "days", "back", "well", "want", "need", "know", "think", "please",
    // Italian
    "che", "non", "per", "una", "con", "del", "della", "delle", "dei", "degli", "dello", "nel",
    "nella", "nelle", "nei", "negli", "nello", "sul", "sulla", "sulle", "sui", "sugli", "alla",
    "alle", "allo", "agli", "dal", "dalla", "dalle", "dai", "dagli", "dallo", "questo",
    "questa", "questi", "queste", "quello", "quella", "quelli", "quelle", "sono", "sei",
    "siamo", "siete", "era", "ero", "erano", "essere", "stato", "stata", "stati", "state",
    "hai", "hanno", "abbiamo", "avete", "avere", "avuto", "come", "anche", "più", "perché",
    "perchè", "però", "quando", "dove", "cosa", "tutto", "tutti", "tutta", "tutte", "molto",
    "molta", "molti", "molte", "poco", "ogni", "solo", "ancora", "già", "fare", "fatto",
    "può", "mio", "mia", "miei", "mie", "tuo", "tua", "suo", "sua", "suoi", "sue", "loro",
    "nostro", "nostra", "vostro", "vostra", "lui", "lei", "noi", "voi", "gli", "uno", "tra",
    "fra", "dopo", "poi", "qui", "qua", "così", "cui", "chi", "quale", "quali", "quanto",
    "sia", "anzi", "ecc", "quindi", "mentre", "invece", "oppure", "allora", "proprio",
    "altro", "altra", "altri", "altre", "stesso", "stessa", "ora", "adesso", "mai", "sempre",
    "niente", "nulla", "qualche", "qualcosa", "volta", "volte", "giorno", "giorni", "essa",
    "esso", "ciò", "cioè", "fino", "verso", "presso", "sopra", "sotto", "senza",
    "infatti", "comunque", "inoltre", "appena", "sto", "sta", "stanno", "stavo",
    "faccio", "fa", "fanno", "vuole", "voglio", "devo", "deve", "posso", "possono", "viene",
    "vengono", "dire", "detto", "ecco", "tanto", "troppo", "tante", "tanti", "nostri",
    "vostri", "avevo", "aveva", "avevano", "essendo", "abbia", "fosse", "sarebbe", "sarà",
    "saranno", "quest", "dell", "nell", "sull", "dall", "anch", "quell",
];

pub const POSITIVE_WORDS_LIST: &[&str] = &[
    // English
    "great", "good", "excellent", "amazing", "awesome", "love", "loved", "loves", "perfect",
    "best", "fantastic", "wonderful", "easy", "useful", "helpful", "fast", "quick", "smooth",
    "intuitive", "reliable", "nice", "beautiful", "brilliant", "recommend", "recommended",
    "happy", "satisfied", "convenient", "simple", "clean", "stable", "efficient", "enjoy",
    "superb", "outstanding", "impressive", "favorite", "friendly", "thanks", "thank",
    "pleasant", "seamless", "handy", "improved", "solid", "worth", "cool",
    // Italian
    "ottimo", "ottima", "ottimi", "ottime", "buono", "buona", "bello", "bella", "bellissima",
    "bellissimo", "eccellente", "fantastico", "fantastica", "perfetto", "perfetta",
    "perfetti", "utile", "utilissima", "facile", "semplice", "veloce", "velocissima",
    "intuitiva", "intuitivo", "comoda", "comodo", "affidabile", "consiglio", "consigliata",
    "consigliato", "soddisfatto", "soddisfatta", "grazie", "top", "super", "stupenda",
    "meravigliosa", "efficiente", "chiara", "chiaro", "pratica", "pratico", "fluida",
    "stabile", "migliore", "piace", "adoro", "felice", "bravi", "brava", "rapido", "rapida",
    "geniale",
];

pub const NEGATIVE_WORDS_LIST: &[&str] = &[
    // English
    "bad", "terrible", "awful", "horrible", "worst", "hate", "poor", "useless", "broken",
    "bug", "bugs", "buggy", "crash", "crashes", "crashed", "crashing", "slow", "error",
    "errors", "problem", "problems", "issue", "issues", "fail", "fails", "failed", "failure",
    "annoying", "disappointed", "disappointing", "frustrating", "confusing", "difficult",
    "impossible", "waste", "scam", "unusable", "glitch", "glitchy", "freeze", "freezes",
    "laggy", "lag", "unstable", "garbage", "rubbish", "ridiculous", "wrong", "stuck",
    "nightmare", "unreliable", "complicated",
    // Italian
    "pessimo", "pessima", "pessimi", "terribile", "orribile", "schifo", "inutile", "lento",
    "lenta", "lentissima", "errore", "errori", "problema", "problemi", "bloccata", "bloccato",
    "blocca", "crasha", "difficile", "impossibile", "vergogna", "vergognoso", "deludente",
    "delusione", "delusa", "deluso", "peggiore", "peggio", "peggiorata", "truffa",
    "scadente", "complicata", "complicato", "confusa", "sbagliato", "disastro", "rotto",
    "rotta", "insopportabile", "assurdo", "ridicolo", "instabile",
];

/// Off-topic categories, in tie-breaking priority order.
pub const PRICING_KEYWORDS: &[&str] = &[
    "price", "prices", "pricing", "expensive", "cheap", "cost", "costs", "fee", "fees",
    "charge", "charged", "charges", "billing", "bill", "subscription", "subscriptions",
    "refund", "refunds", "money", "overcharged", "paywall", "renewal", "commission",
    "prezzo", "prezzi", "costo", "costi", "caro", "costoso", "costosa", "commissione",
    "commissioni", "abbonamento", "abbonamenti", "rimborso", "rimborsi", "addebito",
    "addebiti", "addebitato", "soldi", "euro", "tariffa", "tariffe", "pagare", "pagato",
    "canone", "hidden fees", "too expensive", "costi nascosti", "troppo caro", "money back",
    "free trial", "prova gratuita",
];

pub const SUPPORT_KEYWORDS: &[&str] = &[
    "support", "customer", "assistance", "agent", "agents", "operator", "operators",
    "helpdesk", "ticket", "tickets", "call", "called", "phone", "email", "emails", "respond",
    "response", "responded", "reply", "replied", "waiting", "rude", "unhelpful", "contact",
    "contacted", "assistenza", "operatore", "operatori", "operatrice", "supporto",
    "risposta", "risposte", "rispondono", "risponde", "telefono", "telefonata", "chiamata",
    "chiamato", "mail", "attesa", "reclamo", "reclami", "scortese", "maleducato",
    "customer service", "customer support", "customer care", "servizio clienti",
    "assistenza clienti", "numero verde", "no response", "nessuna risposta",
    "non rispondono",
];

pub const POLICY_KEYWORDS: &[&str] = &[
    "policy", "policies", "terms", "conditions", "contract", "privacy", "banned", "ban",
    "suspended", "suspension", "fraud", "compliance", "regulation", "law", "legal", "lawyer",
    "gdpr", "kyc", "closure", "termination", "contratto", "contratti", "condizioni",
    "termini", "regolamento", "norme", "legge", "avvocato", "sospeso", "sospesa",
    "sospensione", "chiuso", "chiusura", "recesso", "disdetta", "clausola", "clausole",
    "trasparenza", "antiriciclaggio", "terms of service", "privacy policy",
    "termini di servizio", "account chiuso", "conto chiuso", "account sospeso",
    "conto bloccato",
];

pub const PHYSICAL_KEYWORDS: &[&str] = &[
    "store", "shop", "branch", "branches", "office", "offices", "location", "locations",
    "counter", "staff", "employee", "employees", "cashier", "queue", "parking",
    "restaurant", "hotel", "delivery", "courier", "shipping", "package", "warehouse",
    "negozio", "negozi", "filiale", "filiali", "sportello", "sportelli", "ufficio", "uffici",
    "sede", "cassa", "cassiere", "commessa", "commesso", "personale", "dipendente",
    "dipendenti", "coda", "fila", "parcheggio", "ristorante", "consegna", "corriere",
    "spedizione", "pacco", "magazzino", "in store", "punto vendita", "in filiale",
    "physical store",
];

pub const APP_RELATED_KEYWORDS: &[&str] = &[
    "app", "apps", "application", "update", "updates", "updated", "version", "interface",
    "screen", "screens", "button", "buttons", "login", "password", "crash", "crashes",
    "crashed", "bug", "bugs", "feature", "features", "notification", "notifications",
    "design", "layout", "menu", "navigation", "loading", "sync", "widget", "fingerprint",
    "iphone", "ipad", "android", "ios", "install", "installed", "download", "downloaded",
    "settings", "scroll", "search", "user-friendly", "intuitive", "freeze", "freezes",
    "glitch", "error", "errors", "offline", "battery", "performance", "connection", "server",
    "applicazione", "aggiornamento", "aggiornamenti", "aggiornata", "versione",
    "interfaccia", "schermata", "schermo", "pulsante", "pulsanti", "tasto", "accesso",
    "accedere", "funzione", "funzioni", "funzionalità", "notifica", "notifiche", "grafica",
    "caricamento", "sincronizzazione", "impostazioni", "installare", "installata",
    "scaricata", "scaricato", "bloccata", "crasha", "errore", "errori", "navigazione",
    "usabilità", "intuitiva", "menù", "utilizzo", "face id", "touch id", "dark mode",
    "non si apre", "schermata bianca", "user friendly",
];

fn to_set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

pub static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| to_set(STOP_WORDS_LIST));
pub static POSITIVE_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| to_set(POSITIVE_WORDS_LIST));
pub static NEGATIVE_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| to_set(NEGATIVE_WORDS_LIST));
