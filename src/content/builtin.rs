//! Built-in content tables shipped with the app.

use crate::types::CategoryId;

pub(super) struct ImpostorTable {
    pub id: CategoryId,
    pub name: &'static str,
    pub easy: &'static [(&'static str, &'static str)],
    pub medium: &'static [(&'static str, &'static str)],
    pub hard: &'static [(&'static str, &'static str)],
}

pub(super) struct TabooTable {
    pub id: CategoryId,
    pub name: &'static str,
    pub cards: &'static [(&'static str, [&'static str; 5])],
}

pub(super) const IMPOSTOR: &[ImpostorTable] = &[
    ImpostorTable {
        id: 1,
        name: "Animales",
        easy: &[
            ("perro", "mascota"),
            ("gato", "bigotes"),
            ("vaca", "campo"),
            ("caballo", "galope"),
            ("pato", "laguna"),
        ],
        medium: &[
            ("jirafa", "altura"),
            ("pingüino", "frío"),
            ("delfín", "inteligente"),
            ("camaleón", "colores"),
        ],
        hard: &[
            ("ornitorrinco", "rareza"),
            ("axolote", "regeneración"),
            ("carpincho", "humedal"),
            ("narval", "cuerno"),
        ],
    },
    ImpostorTable {
        id: 2,
        name: "Comidas",
        easy: &[
            ("pizza", "horno"),
            ("empanada", "repulgue"),
            ("helado", "verano"),
            ("milanesa", "pan rallado"),
            ("asado", "domingo"),
        ],
        medium: &[
            ("sushi", "palitos"),
            ("locro", "patria"),
            ("ñoquis", "día 29"),
            ("alfajor", "kiosco"),
        ],
        hard: &[
            ("carbonada", "calabaza"),
            ("humita", "choclo"),
            ("risotto", "paciencia"),
            ("fondue", "montaña"),
        ],
    },
    ImpostorTable {
        id: 3,
        name: "Lugares",
        easy: &[
            ("playa", "arena"),
            ("escuela", "recreo"),
            ("hospital", "guardia"),
            ("cine", "pochoclo"),
            ("supermercado", "changuito"),
        ],
        medium: &[
            ("aeropuerto", "espera"),
            ("biblioteca", "silencio"),
            ("estadio", "tribuna"),
            ("museo", "historia"),
        ],
        hard: &[
            ("faro", "costa"),
            ("observatorio", "cielo"),
            ("submarino", "presión"),
            ("estación espacial", "órbita"),
        ],
    },
    ImpostorTable {
        id: 4,
        name: "Objetos",
        easy: &[
            ("silla", "respaldo"),
            ("llave", "cerradura"),
            ("paraguas", "lluvia"),
            ("espejo", "reflejo"),
            ("reloj", "agujas"),
        ],
        medium: &[
            ("linterna", "apagón"),
            ("tijera", "filo"),
            ("candado", "combinación"),
            ("termo", "ronda"),
        ],
        hard: &[
            ("brújula", "norte"),
            ("metrónomo", "ritmo"),
            ("sextante", "navegación"),
            ("reloj de arena", "paciencia"),
        ],
    },
    ImpostorTable {
        id: 5,
        name: "Profesiones",
        easy: &[
            ("médico", "receta"),
            ("bombero", "sirena"),
            ("maestro", "pizarrón"),
            ("cocinero", "delantal"),
            ("policía", "patrullero"),
        ],
        medium: &[
            ("arquitecto", "planos"),
            ("periodista", "primicia"),
            ("veterinario", "vacuna"),
            ("piloto", "cabina"),
        ],
        hard: &[
            ("escribano", "firma"),
            ("sommelier", "copa"),
            ("taxidermista", "vitrina"),
            ("actuario", "riesgo"),
        ],
    },
];

pub(super) const TABOO: &[TabooTable] = &[
    TabooTable {
        id: 1,
        name: "General",
        cards: &[
            ("playa", ["arena", "mar", "verano", "sol", "vacaciones"]),
            ("teléfono", ["llamar", "celular", "hablar", "número", "mensaje"]),
            ("cumpleaños", ["torta", "velas", "regalo", "fiesta", "años"]),
            ("lluvia", ["agua", "paraguas", "nube", "mojado", "tormenta"]),
            ("escuela", ["maestra", "alumno", "clase", "aula", "recreo"]),
            ("dormir", ["cama", "noche", "sueño", "almohada", "descansar"]),
            ("auto", ["manejar", "ruedas", "volante", "nafta", "ruta"]),
            ("dinero", ["plata", "billete", "banco", "pagar", "moneda"]),
        ],
    },
    TabooTable {
        id: 2,
        name: "Comidas",
        cards: &[
            ("pizza", ["queso", "masa", "horno", "muzzarella", "porción"]),
            ("mate", ["yerba", "bombilla", "termo", "agua", "ronda"]),
            ("asado", ["carne", "parrilla", "domingo", "fuego", "chorizo"]),
            ("helado", ["frío", "cucurucho", "gusto", "verano", "crema"]),
            ("empanada", ["carne", "masa", "horno", "repulgue", "relleno"]),
            ("café", ["taza", "negro", "leche", "mañana", "cafeína"]),
        ],
    },
    TabooTable {
        id: 3,
        name: "Deportes",
        cards: &[
            ("fútbol", ["pelota", "gol", "arco", "Messi", "cancha"]),
            ("tenis", ["raqueta", "red", "pelota", "set", "Wimbledon"]),
            ("natación", ["pileta", "agua", "nadar", "malla", "brazada"]),
            ("boxeo", ["guantes", "ring", "piña", "round", "nocaut"]),
            ("ajedrez", ["rey", "reina", "tablero", "jaque", "peón"]),
            ("ciclismo", ["bicicleta", "pedal", "rueda", "casco", "carrera"]),
        ],
    },
    TabooTable {
        id: 4,
        name: "Cine y TV",
        cards: &[
            ("Titanic", ["barco", "iceberg", "hundir", "Leonardo", "Rose"]),
            ("Harry Potter", ["mago", "varita", "Hogwarts", "anteojos", "cicatriz"]),
            ("Los Simpson", ["amarillo", "Homero", "Bart", "dibujo", "Springfield"]),
            ("Star Wars", ["galaxia", "Jedi", "espada", "Vader", "fuerza"]),
            ("noticiero", ["noticias", "periodista", "televisión", "informe", "canal"]),
            ("pochoclo", ["maíz", "cine", "balde", "manteca", "dulce"]),
        ],
    },
];
